use parambind::Bind;

#[derive(Bind)]
pub struct Search {
    #[bind(parms = "q")]
    query: String,
}

fn main() {}

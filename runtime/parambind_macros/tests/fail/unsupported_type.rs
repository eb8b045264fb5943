use parambind::Bind;

#[derive(Bind)]
pub struct Upload {
    bytes: Vec<u8>,
}

fn main() {}

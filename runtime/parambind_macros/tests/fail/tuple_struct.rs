use parambind::Bind;

#[derive(Bind)]
pub struct Id(i64);

fn main() {}

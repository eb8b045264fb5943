use parambind::Bind;

#[derive(Bind)]
pub struct Wrapper<T> {
    inner: T,
}

fn main() {}

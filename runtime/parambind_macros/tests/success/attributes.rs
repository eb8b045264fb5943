use parambind::{Bind, Binder, plan::DefaultMode};

#[derive(Bind)]
pub struct Attributes {
    #[bind(params = "page;Min(1)", default = "1")]
    page: i64,
    #[bind(default = "-")]
    r#type: String,
    #[bind(params = ";Length(0,3)")]
    ids: Vec<i64>,
    #[bind()]
    plain: bool,
}

fn main() {
    let plan = Binder::new().plan::<Attributes>().unwrap();
    let keys: Vec<_> = plan.entries().iter().map(|e| e.key()).collect();
    assert_eq!(keys, ["page", "type", "ids", "plain"]);
    assert_eq!(plan.entries()[1].default_mode(), &DefaultMode::Omit);
    assert_eq!(plan.entries()[2].validators()[0].name(), "Length");
}

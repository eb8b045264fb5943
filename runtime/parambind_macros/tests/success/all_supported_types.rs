use parambind::{Bind, Binder, FormValues, Kind, ElemKind};

#[derive(Bind, Default)]
pub struct Everything {
    a: i8,
    b: i16,
    c: i32,
    d: i64,
    e: isize,
    f: u8,
    g: u16,
    h: u32,
    i: u64,
    j: usize,
    k: f32,
    l: f64,
    m: bool,
    n: String,
    o: Vec<i64>,
    p: Vec<String>,
}

fn main() {
    let binder = Binder::new();
    let plan = binder.plan::<Everything>().unwrap();
    assert_eq!(plan.entries().len(), 16);
    assert_eq!(plan.entries()[0].kind(), Kind::I8);
    assert_eq!(plan.entries()[15].kind(), Kind::Seq(ElemKind::String));

    let mut record = Everything::default();
    let input = FormValues::parse(
        "a=1&b=2&c=3&d=4&e=5&f=6&g=7&h=8&i=9&j=10&k=1.5&l=2.5&m=t&n=x&o=1,2&p=a,b",
    );
    binder.bind(&mut record, &input).unwrap();
    assert_eq!(record.a, 1);
    assert_eq!(record.j, 10);
    assert_eq!(record.l, 2.5);
    assert!(record.m);
    assert_eq!(record.o, vec![1, 2]);
    assert_eq!(record.p, vec!["a".to_string(), "b".to_string()]);
}

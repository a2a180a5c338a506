use ipt_macros::value_object;

#[value_object]
struct Licence {
    url: String,
}

#[value_object(default = false)]
struct Doi(String);

#[value_object]
#[derive(Copy)]
enum Frequency {
    #[default]
    Unknown,
    Monthly,
}

fn main() {
    let _ = format!("{:?}", Licence::default());
    let doi = Doi("10.1234/abc".to_string());
    assert_eq!(doi.clone(), doi);

    let f: Frequency = Default::default();
    let g = f;
    assert_eq!(f, g);
    assert_ne!(f, Frequency::Monthly);
}

use ipt_macros::entity_id;
use uuid::Uuid;

#[entity_id]
struct OrganisationKey(Uuid);

#[entity_id(debug = false)]
struct Handle(String);

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handle(..)")
    }
}

fn main() {
    let key = OrganisationKey::new(Uuid::new_v4());
    let parsed: OrganisationKey = key.to_string().parse().unwrap();
    assert_eq!(parsed, key);

    let handle: Handle = "ipt".to_string().into();
    let raw: String = handle.clone().into();
    assert_eq!(raw, "ipt");
    let inner: &String = handle.as_ref();
    let _ = format!("{:?} {}", handle, inner);
}

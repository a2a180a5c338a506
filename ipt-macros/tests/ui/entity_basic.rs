use ipt_domain::entity::Entity;
use ipt_macros::{entity, entity_id};

#[entity_id]
struct DatasetKey(String);

#[entity(id = DatasetKey)]
#[derive(Clone)]
struct Dataset {
    title: String,
    records: u64,
}

#[entity(debug = false)]
struct Quiet {
    note: String,
}

impl std::fmt::Debug for Quiet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Quiet(..)")
    }
}

fn main() {
    let ds = Dataset::new(DatasetKey::new("birds".into()));
    assert_eq!(ds.id().to_string(), "birds");
    assert_eq!(ds.revision(), 0);
    assert_eq!(ds.records, 0);
    let _ = ds.clone().title;

    let quiet = Quiet::new("q".to_string());
    let _ = format!("{:?} {}", quiet, quiet.note);
}

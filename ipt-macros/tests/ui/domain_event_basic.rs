use ipt_domain::domain_event::DomainEvent;
use ipt_macros::domain_event;

#[domain_event(version = 2)]
enum DatasetEvent {
    Published { records: u64 },
    #[event(event_type = "dataset.renamed", event_version = 5)]
    Renamed { title: String },
    Archived {},
}

fn main() {
    let published = DatasetEvent::Published {
        id: "e-1".into(),
        aggregate_revision: 3,
        records: 10,
    };
    assert_eq!(published.event_id(), "e-1");
    assert_eq!(published.event_type(), "DatasetEvent.Published");
    assert_eq!(published.event_version(), 2);
    assert_eq!(published.aggregate_revision(), 3);

    let renamed = DatasetEvent::Renamed {
        id: "e-2".into(),
        aggregate_revision: 4,
        title: "Birds".into(),
    };
    assert_eq!(renamed.event_type(), "dataset.renamed");
    assert_eq!(renamed.event_version(), 5);

    let archived = DatasetEvent::Archived {
        id: "e-3".into(),
        aggregate_revision: 5,
    };
    assert_eq!(archived.clone(), archived);
}

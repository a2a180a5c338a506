/// 资源发布生命周期示例
/// 演示私有发布、公开、预留 DOI、主/次版本升级以及引用生成
use chrono::Utc;
use ipt_domain::aggregate_root;
use ipt_domain::domain_event::{DomainEvent, EventContext};
use ipt_domain::error::DomainResult;
use ipt_resource::metadata::{Agent, Eml};
use ipt_resource::{Doi, PublicationStatus, Resource, ResourceCommand, ShortName};
use uuid::Uuid;

fn run(resource: &mut Resource, command: ResourceCommand) -> DomainResult<()> {
    let context = EventContext::builder()
        .actor_id("admin@example.org".into())
        .build();
    for envelope in aggregate_root::handle(resource, command, context)? {
        println!(
            "  #{} {}",
            envelope.metadata.aggregate_revision(),
            envelope.payload.event_type()
        );
    }
    Ok(())
}

fn publish(resource: &mut Resource, summary: &str) -> DomainResult<()> {
    run(
        resource,
        ResourceCommand::Publish {
            change_summary: Some(summary.into()),
            records_published: 1250,
            published_at: Utc::now(),
        },
    )?;
    println!(
        "published v{} (DOI: {})",
        resource.version(),
        resource
            .doi()
            .map(Doi::to_string)
            .unwrap_or_else(|| "none".into())
    );
    Ok(())
}

fn main() -> DomainResult<()> {
    let mut resource = Resource::create(ShortName::parse("danish-birds")?);
    resource.set_eml(
        Eml::builder()
            .title("Breeding birds of Denmark")
            .date_stamp(Utc::now())
            .creators(vec![
                Agent::builder()
                    .first_name("Karen")
                    .last_name("Jensen")
                    .build(),
            ])
            .build(),
    );

    publish(&mut resource, "initial import")?;
    publish(&mut resource, "spelling fixes")?;

    run(
        &mut resource,
        ResourceCommand::ChangeVisibility {
            status: PublicationStatus::Public,
        },
    )?;
    run(
        &mut resource,
        ResourceCommand::ReserveDoi {
            doi: Doi::parse("10.5072/dk-birds")?,
            organisation_key: Uuid::new_v4(),
        },
    )?;
    println!("next version: v{}", resource.next_version());
    publish(&mut resource, "DOI assigned")?;

    if let Some(citation) = resource.generate_citation(
        &resource.next_version().to_string(),
        "https://ipt.example.org/resource?r=danish-birds",
    ) {
        println!("citation: {citation}");
    }

    for entry in resource.version_history() {
        println!(
            "history v{} {} {}",
            entry.version(),
            entry.publication_status(),
            entry.change_summary().unwrap_or_default()
        );
    }
    Ok(())
}

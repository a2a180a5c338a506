//! 资源聚合的命令与事件
//!
//! `execute` 只做校验并产生事件，状态变化全部发生在 `apply` 中，
//! 因此按顺序重放事件即可重建资源的版本与 DOI 状态。
//!
use super::Resource;
use crate::identifier::{Doi, IdentifierStatus};
use crate::party::Organisation;
use crate::status::PublicationStatus;
use crate::version::ResourceVersion;
use crate::version_history::VersionHistory;
use chrono::{DateTime, Utc};
use ipt_domain::aggregate::Aggregate;
use ipt_domain::domain_event::{DomainEvent, FieldChanged};
use ipt_domain::entity::Entity;
use ipt_domain::error::DomainError;
use ipt_macros::domain_event;
use tracing::warn;
use uuid::Uuid;

/// 资源命令
#[derive(Debug, Clone)]
pub enum ResourceCommand {
    /// 为资源预留新的 DOI
    ReserveDoi { doi: Doi, organisation_key: Uuid },
    /// 删除尚未公开的 DOI
    DeleteDoi,
    ChangeIdentifierStatus { status: IdentifierStatus },
    /// 在私有、公开与删除之间切换；注册请使用 `Register`
    ChangeVisibility { status: PublicationStatus },
    Register { key: Uuid, organisation: Organisation },
    /// 以下一个版本号发布
    Publish {
        change_summary: Option<String>,
        records_published: u64,
        published_at: DateTime<Utc>,
    },
}

/// 资源事件
#[domain_event(version = 1)]
pub enum ResourceEvent {
    DoiReserved {
        doi: Doi,
        organisation_key: Uuid,
    },
    /// `fallback` 为此前已公开分配的 DOI
    DoiDeleted {
        doi: Doi,
        fallback: Option<Doi>,
    },
    IdentifierStatusChanged {
        change: FieldChanged<IdentifierStatus>,
    },
    VisibilityChanged {
        change: FieldChanged<PublicationStatus>,
    },
    Registered {
        key: Uuid,
        organisation: Organisation,
    },
    VersionPublished {
        version: ResourceVersion,
        change_summary: Option<String>,
        records_published: u64,
        published_at: DateTime<Utc>,
        /// 发布后的 DOI 状态
        identifier_status: IdentifierStatus,
    },
}

fn event_id() -> String {
    ulid::Ulid::new().to_string()
}

impl Resource {
    /// DOI 已预留但尚未随发布公开
    fn has_pending_doi(&self) -> bool {
        self.doi.is_some()
            && matches!(
                self.identifier_status,
                IdentifierStatus::ReservedPendingPublication
                    | IdentifierStatus::PublicPendingPublication
            )
    }

    /// 预留状态随可见性决定：公开可见的资源在下次发布时公开 DOI
    fn pending_status(&self) -> IdentifierStatus {
        if self.status.is_publicly_available() {
            IdentifierStatus::PublicPendingPublication
        } else {
            IdentifierStatus::ReservedPendingPublication
        }
    }

    fn ensure_not_deleted(&self) -> Result<(), DomainError> {
        if self.status == PublicationStatus::Deleted {
            return Err(DomainError::InvalidState {
                reason: format!("resource {} has been deleted", self.id),
            });
        }
        Ok(())
    }

    fn publish_event(
        &self,
        change_summary: Option<String>,
        records_published: u64,
        published_at: DateTime<Utc>,
    ) -> Result<ResourceEvent, DomainError> {
        self.ensure_not_deleted()?;

        let version = self.next_version();
        if let Some(last) = self.last_published_version() {
            if !version.is_newer_than(&last) {
                return Err(DomainError::InvalidState {
                    reason: format!(
                        "version {version} of resource {} is not newer than last published version {last}",
                        self.id
                    ),
                });
            }
        }
        if version.is_newer_than(&self.version()) {
            self.ensure_replaces_last_published(&self.version())
                .map_err(|err| DomainError::InvalidState {
                    reason: err.to_string(),
                })?;
        }

        let identifier_status = match self.identifier_status {
            IdentifierStatus::PublicPendingPublication if self.is_publicly_available() => {
                IdentifierStatus::Public
            }
            status => status,
        };

        Ok(ResourceEvent::VersionPublished {
            id: event_id(),
            aggregate_revision: self.revision + 1,
            version,
            change_summary,
            records_published,
            published_at,
            identifier_status,
        })
    }
}

impl Aggregate for Resource {
    const TYPE: &'static str = "resource";

    type Command = ResourceCommand;
    type Event = ResourceEvent;
    type Error = DomainError;

    fn execute(&self, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let aggregate_revision = self.revision() + 1;

        let event = match command {
            ResourceCommand::ReserveDoi {
                doi,
                organisation_key,
            } => {
                self.ensure_not_deleted()?;
                if self.has_pending_doi() {
                    return Err(DomainError::InvalidState {
                        reason: format!(
                            "resource {} already has a DOI pending publication",
                            self.id
                        ),
                    });
                }
                ResourceEvent::DoiReserved {
                    id: event_id(),
                    aggregate_revision,
                    doi,
                    organisation_key,
                }
            }
            ResourceCommand::DeleteDoi => {
                let Some(doi) = self.doi.clone().filter(|_| self.has_pending_doi()) else {
                    return Err(DomainError::InvalidState {
                        reason: format!(
                            "resource {} has no DOI pending publication to delete",
                            self.id
                        ),
                    });
                };
                ResourceEvent::DoiDeleted {
                    id: event_id(),
                    aggregate_revision,
                    fallback: self.assigned_doi().filter(|assigned| **assigned != doi).cloned(),
                    doi,
                }
            }
            ResourceCommand::ChangeIdentifierStatus { status } => {
                if self.doi.is_none() {
                    return Err(DomainError::InvalidState {
                        reason: format!("resource {} has no DOI", self.id),
                    });
                }
                let Some(change) = FieldChanged::between(self.identifier_status, status) else {
                    return Err(DomainError::InvalidCommand {
                        reason: format!("identifier status is already {status}"),
                    });
                };
                ResourceEvent::IdentifierStatusChanged {
                    id: event_id(),
                    aggregate_revision,
                    change,
                }
            }
            ResourceCommand::ChangeVisibility { status } => {
                if status == PublicationStatus::Registered {
                    return Err(DomainError::InvalidCommand {
                        reason: "use Register to register a resource".into(),
                    });
                }
                if self.status == PublicationStatus::Registered
                    && status != PublicationStatus::Deleted
                {
                    return Err(DomainError::InvalidState {
                        reason: format!("registered resource {} can only be deleted", self.id),
                    });
                }
                let Some(change) = FieldChanged::between(self.status, status) else {
                    return Err(DomainError::InvalidCommand {
                        reason: format!("visibility is already {status}"),
                    });
                };
                ResourceEvent::VisibilityChanged {
                    id: event_id(),
                    aggregate_revision,
                    change,
                }
            }
            ResourceCommand::Register { key, organisation } => {
                if self.is_registered() || self.status == PublicationStatus::Registered {
                    return Err(DomainError::InvalidState {
                        reason: format!("resource {} is already registered", self.id),
                    });
                }
                if !self.is_publicly_available() {
                    return Err(DomainError::InvalidState {
                        reason: format!("resource {} must be public to be registered", self.id),
                    });
                }
                ResourceEvent::Registered {
                    id: event_id(),
                    aggregate_revision,
                    key,
                    organisation,
                }
            }
            ResourceCommand::Publish {
                change_summary,
                records_published,
                published_at,
            } => self.publish_event(change_summary, records_published, published_at)?,
        };

        Ok(vec![event])
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ResourceEvent::DoiReserved {
                doi,
                organisation_key,
                ..
            } => {
                self.doi = Some(doi.clone());
                self.doi_organisation_key = Some(*organisation_key);
                self.identifier_status = self.pending_status();
                self.sync_doi_identifiers();
            }
            ResourceEvent::DoiDeleted { fallback, .. } => {
                // 先撤下被删除的 DOI，再恢复已分配的 DOI
                self.identifier_status = IdentifierStatus::Unreserved;
                self.sync_doi_identifiers();
                match fallback {
                    Some(assigned) => {
                        self.doi = Some(assigned.clone());
                        self.identifier_status = IdentifierStatus::Public;
                        self.sync_doi_identifiers();
                    }
                    None => {
                        self.doi = None;
                        self.doi_organisation_key = None;
                    }
                }
            }
            ResourceEvent::IdentifierStatusChanged { change, .. } => {
                self.identifier_status = *change.new_value();
                self.sync_doi_identifiers();
            }
            ResourceEvent::VisibilityChanged { change, .. } => {
                self.status = *change.new_value();
                self.identifier_status = match (self.status, self.identifier_status) {
                    (PublicationStatus::Deleted, IdentifierStatus::Public) => {
                        IdentifierStatus::Unavailable
                    }
                    (
                        _,
                        IdentifierStatus::ReservedPendingPublication
                        | IdentifierStatus::PublicPendingPublication,
                    ) if self.doi.is_some() => self.pending_status(),
                    (_, status) => status,
                };
                self.sync_doi_identifiers();
            }
            ResourceEvent::Registered {
                key, organisation, ..
            } => {
                self.key = Some(*key);
                self.organisation = Some(organisation.clone());
                self.status = PublicationStatus::Registered;
            }
            ResourceEvent::VersionPublished {
                version,
                change_summary,
                records_published,
                published_at,
                identifier_status,
                ..
            } => {
                if let Err(err) = self.set_version(*version) {
                    warn!(short_name = %self.id, version = %version, error = %err, "replaced version not recorded");
                    self.eml_version = Some(*version);
                    self.eml.set_version(Some(*version));
                }
                self.identifier_status = *identifier_status;
                self.last_published = Some(*published_at);
                self.records_published = *records_published;
                self.change_summary = change_summary.clone();
                self.sync_doi_identifiers();

                let entry = VersionHistory::builder()
                    .version(*version)
                    .publication_status(self.status)
                    .maybe_doi(self.doi.clone())
                    .status(self.identifier_status)
                    .maybe_change_summary(change_summary.clone())
                    .released(*published_at)
                    .records_published(*records_published)
                    .build();
                // 历史按数值匹配版本，1.10 会顶替较早发布的 1.1
                let superseded = self.remove_version_history(version);
                if superseded > 0 {
                    warn!(short_name = %self.id, version = %version, superseded, "numerically equal history entry replaced");
                }
                self.add_version_history(entry);
            }
        }
        self.revision = event.aggregate_revision();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipt_domain::aggregate_root;
    use ipt_domain::domain_event::EventContext;

    fn resource() -> Resource {
        Resource::create(crate::resource::ShortName::new("birds".into()))
    }

    fn publish(resource: &mut Resource) -> ResourceVersion {
        aggregate_root::handle(
            resource,
            ResourceCommand::Publish {
                change_summary: None,
                records_published: 10,
                published_at: Utc::now(),
            },
            EventContext::default(),
        )
        .unwrap();
        resource.version()
    }

    fn doi(s: &str) -> Doi {
        Doi::parse(s).unwrap()
    }

    #[test]
    fn execute_does_not_mutate() {
        let resource = resource();
        let events = resource
            .execute(ResourceCommand::ReserveDoi {
                doi: doi("10.5072/abc"),
                organisation_key: Uuid::new_v4(),
            })
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "ResourceEvent.DoiReserved");
        assert_eq!(events[0].aggregate_revision(), 1);
        assert!(resource.doi().is_none());
    }

    #[test]
    fn reserve_doi_while_private_stays_reserved() {
        let mut resource = resource();
        let mut events = resource
            .execute(ResourceCommand::ReserveDoi {
                doi: doi("10.5072/abc"),
                organisation_key: Uuid::new_v4(),
            })
            .unwrap();
        resource.apply(&events.remove(0));

        assert_eq!(
            resource.identifier_status(),
            IdentifierStatus::ReservedPendingPublication
        );
        assert!(resource.eml().alternate_identifiers().is_empty());
        assert_eq!(resource.revision(), 1);

        let err = resource
            .execute(ResourceCommand::ReserveDoi {
                doi: doi("10.5072/def"),
                organisation_key: Uuid::new_v4(),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
    }

    #[test]
    fn making_resource_public_promotes_pending_doi() {
        let mut resource = resource();
        for command in [
            ResourceCommand::ReserveDoi {
                doi: doi("10.5072/abc"),
                organisation_key: Uuid::new_v4(),
            },
            ResourceCommand::ChangeVisibility {
                status: PublicationStatus::Public,
            },
        ] {
            aggregate_root::handle(&mut resource, command, EventContext::default()).unwrap();
        }
        assert_eq!(
            resource.identifier_status(),
            IdentifierStatus::PublicPendingPublication
        );
        assert_eq!(resource.eml().alternate_identifiers(), ["10.5072/abc"]);
        assert_eq!(resource.revision(), 2);
    }

    #[test]
    fn visibility_rules() {
        let mut resource = resource();
        let err = resource
            .execute(ResourceCommand::ChangeVisibility {
                status: PublicationStatus::Registered,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCommand { .. }));

        let err = resource
            .execute(ResourceCommand::ChangeVisibility {
                status: PublicationStatus::Private,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCommand { .. }));

        let err = resource
            .execute(ResourceCommand::Register {
                key: Uuid::new_v4(),
                organisation: Organisation::new(Uuid::new_v4(), "GBIF"),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
    }

    #[test]
    fn register_then_only_delete() {
        let mut resource = resource();
        let key = Uuid::new_v4();
        for command in [
            ResourceCommand::ChangeVisibility {
                status: PublicationStatus::Public,
            },
            ResourceCommand::Register {
                key,
                organisation: Organisation::new(Uuid::new_v4(), "GBIF Denmark"),
            },
        ] {
            aggregate_root::handle(&mut resource, command, EventContext::default()).unwrap();
        }
        assert!(resource.is_registered());
        assert_eq!(resource.key(), Some(key));

        assert!(resource
            .execute(ResourceCommand::ChangeVisibility {
                status: PublicationStatus::Private,
            })
            .is_err());
        assert!(resource
            .execute(ResourceCommand::ChangeVisibility {
                status: PublicationStatus::Deleted,
            })
            .is_ok());
    }

    #[test]
    fn publishing_records_history() {
        let mut resource = resource();
        assert_eq!(publish(&mut resource), ResourceVersion::INITIAL);
        assert_eq!(publish(&mut resource).to_string(), "1.1");

        assert_eq!(resource.version_history().len(), 2);
        assert_eq!(resource.replaced_version(), ResourceVersion::INITIAL);
        assert_eq!(resource.records_published(), 10);
        assert!(resource.is_published());
        assert_eq!(resource.revision(), 2);
    }

    #[test]
    fn publish_requires_newer_version() {
        let mut resource = resource();
        publish(&mut resource);
        publish(&mut resource);
        resource.set_version(ResourceVersion::INITIAL).unwrap();
        assert_eq!(resource.next_version().to_string(), "1.1");

        let err = resource
            .execute(ResourceCommand::Publish {
                change_summary: None,
                records_published: 0,
                published_at: Utc::now(),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
    }

    #[test]
    fn deleted_resource_cannot_publish() {
        let mut resource = resource();
        aggregate_root::handle(
            &mut resource,
            ResourceCommand::ChangeVisibility {
                status: PublicationStatus::Deleted,
            },
            EventContext::default(),
        )
        .unwrap();
        let err = resource
            .execute(ResourceCommand::Publish {
                change_summary: None,
                records_published: 0,
                published_at: Utc::now(),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
    }

    #[test]
    fn identifier_status_change_requires_doi() {
        let mut resource = resource();
        let err = resource
            .execute(ResourceCommand::ChangeIdentifierStatus {
                status: IdentifierStatus::Public,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));

        resource.set_doi(Some(doi("10.5072/abc")));
        let err = resource
            .execute(ResourceCommand::ChangeIdentifierStatus {
                status: IdentifierStatus::Unreserved,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCommand { .. }));
    }

    #[test]
    fn rehydrate_replays_publication() {
        let mut resource = resource();
        let mut history = Vec::new();
        for command in [
            ResourceCommand::ChangeVisibility {
                status: PublicationStatus::Public,
            },
            ResourceCommand::ReserveDoi {
                doi: doi("10.5072/abc"),
                organisation_key: Uuid::new_v4(),
            },
            ResourceCommand::Publish {
                change_summary: Some("first".into()),
                records_published: 3,
                published_at: Utc::now(),
            },
        ] {
            let envelopes =
                aggregate_root::handle(&mut resource, command, EventContext::default()).unwrap();
            history.extend(envelopes.into_iter().map(|e| e.payload));
        }

        let restored: Resource =
            aggregate_root::rehydrate(resource.short_name().clone(), &history);
        assert_eq!(restored.version(), resource.version());
        assert_eq!(restored.identifier_status(), IdentifierStatus::Public);
        assert_eq!(restored.version_history(), resource.version_history());
        assert_eq!(restored.revision(), 3);
    }
}

//! 跨线程共享的资源句柄
//!
use crate::resource::{Resource, ResourceCommand};
use ipt_domain::aggregate_root;
use ipt_domain::domain_event::{EventContext, EventEnvelope};
use ipt_domain::error::{DomainError, DomainResult};
use std::sync::{Arc, Mutex, MutexGuard};

/// 以互斥锁保护的资源，克隆后指向同一实例
#[derive(Debug, Clone, Default)]
pub struct SharedResource {
    inner: Arc<Mutex<Resource>>,
}

impl SharedResource {
    pub fn new(resource: Resource) -> Self {
        Self {
            inner: Arc::new(Mutex::new(resource)),
        }
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, Resource>> {
        self.inner.lock().map_err(|_| DomainError::InvalidState {
            reason: "resource lock poisoned".into(),
        })
    }

    pub fn read<R>(&self, f: impl FnOnce(&Resource) -> R) -> DomainResult<R> {
        Ok(f(&*self.lock()?))
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut Resource) -> R) -> DomainResult<R> {
        Ok(f(&mut *self.lock()?))
    }

    /// 在同一次加锁内完成备用标识符与引用标识符的同步
    pub fn sync_doi_identifiers(&self) -> DomainResult<bool> {
        self.write(Resource::sync_doi_identifiers)
    }

    pub fn handle(
        &self,
        command: ResourceCommand,
        context: EventContext,
    ) -> DomainResult<Vec<EventEnvelope<Resource>>> {
        let mut resource = self.lock()?;
        aggregate_root::handle(&mut *resource, command, context)
    }

    /// 当前状态的副本
    pub fn snapshot(&self) -> DomainResult<Resource> {
        self.read(Resource::clone)
    }
}

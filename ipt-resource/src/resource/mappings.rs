use super::Resource;
use crate::constants::DWC_ROWTYPE_OCCURRENCE;
use crate::mapping::{CoreRowType, Extension, ExtensionMapping, Source, normalise_name};
use ipt_domain::error::{DomainError, DomainResult};
use std::sync::Arc;
use tracing::debug;

impl Resource {
    pub fn mappings(&self) -> &[ExtensionMapping] {
        &self.mappings
    }

    /// 指定记录类型的映射，保持添加顺序
    pub fn mappings_for<'a>(&'a self, row_type: &str) -> impl Iterator<Item = &'a ExtensionMapping> {
        self.mappings.iter().filter(move |m| m.row_type() == row_type)
    }

    pub fn mapping(&self, row_type: &str, index: usize) -> Option<&ExtensionMapping> {
        self.mappings_for(row_type).nth(index)
    }

    /// 添加映射，返回其在同记录类型映射中的下标
    ///
    /// 非核心映射要求已存在核心映射，否则返回 `InvalidArgument`。
    pub fn add_mapping(&mut self, mapping: ExtensionMapping) -> DomainResult<usize> {
        if !mapping.is_core() && !self.has_core() {
            return Err(DomainError::InvalidArgument {
                reason: format!(
                    "cannot add extension mapping '{}' before a core mapping exists",
                    mapping.extension().title()
                ),
            });
        }
        let index = self.mappings_for(mapping.row_type()).count();
        self.mappings.push(mapping);
        Ok(index)
    }

    /// 删除映射；删除的是最后一个核心映射时清空全部映射
    pub fn delete_mapping(&mut self, mapping: &ExtensionMapping) -> bool {
        let core_row_type = self.core_row_type().map(str::to_owned);
        let Some(position) = self.mappings.iter().position(|m| m == mapping) else {
            return false;
        };
        self.mappings.remove(position);

        let last_core = mapping.is_core()
            && core_row_type.is_some_and(|row_type| self.core_mappings_of(&row_type).next().is_none());
        if last_core {
            debug!(short_name = %self.id, "last core mapping deleted, clearing all mappings");
            self.mappings.clear();
        }
        true
    }

    /// 首个核心映射的记录类型，它决定资源的核心类型
    pub fn core_row_type(&self) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.is_core())
            .map(ExtensionMapping::row_type)
    }

    fn core_mappings_of<'a>(
        &'a self,
        core_row_type: &str,
    ) -> impl Iterator<Item = &'a ExtensionMapping> {
        self.mappings
            .iter()
            .filter(move |m| m.is_core() && m.row_type().eq_ignore_ascii_case(core_row_type))
    }

    /// 核心映射，不含使用核心记录类型的扩展映射
    pub fn core_mappings(&self) -> Vec<&ExtensionMapping> {
        match self.core_row_type() {
            Some(row_type) => self.core_mappings_of(row_type).collect(),
            None => Vec::new(),
        }
    }

    pub fn has_core(&self) -> bool {
        self.core_row_type().is_some()
    }

    /// 存在核心映射时由核心记录类型推导，否则为创建时填写的值
    pub fn core_type(&self) -> Option<&str> {
        match self.core_row_type() {
            Some(row_type) => Some(CoreRowType::from_row_type(row_type).label()),
            None => self.core_type.as_deref(),
        }
    }

    /// 至少一个核心映射映射了字段
    pub fn has_mapped_data(&self) -> bool {
        self.core_mappings().iter().any(|m| !m.fields().is_empty())
    }

    /// 无论核心与否，是否映射了 Occurrence
    pub fn has_occurrence_mapping(&self) -> bool {
        self.mappings_for(DWC_ROWTYPE_OCCURRENCE).next().is_some()
    }

    /// 已映射的扩展，按首次映射顺序去重
    pub fn mapped_extensions(&self) -> Vec<&Extension> {
        let mut extensions: Vec<&Extension> = Vec::new();
        for mapping in &self.mappings {
            if !extensions.contains(&mapping.extension()) {
                extensions.push(mapping.extension());
            }
        }
        extensions
    }

    /// 按规范化名称查找数据源
    pub fn source(&self, name: &str) -> Option<&Arc<Source>> {
        self.sources.get(&normalise_name(name))
    }

    /// 按名称排序的全部数据源
    pub fn sources(&self) -> impl Iterator<Item = &Arc<Source>> {
        self.sources.values()
    }

    /// 添加数据源
    ///
    /// 同名数据源已存在时：不允许覆盖则返回 `AlreadyExists`；
    /// 允许覆盖则替换，并把引用旧实例的映射指向新实例。
    pub fn add_source(&mut self, source: Source, allow_overwrite: bool) -> DomainResult<Arc<Source>> {
        let exists = self.sources.contains_key(source.name());
        if exists && !allow_overwrite {
            return Err(DomainError::AlreadyExists {
                reason: format!("source '{}' in resource {}", source.name(), self.id),
            });
        }

        let source = Arc::new(source);
        if exists {
            for mapping in self
                .mappings
                .iter_mut()
                .filter(|m| m.source().name() == source.name())
            {
                mapping.set_source(Arc::clone(&source));
            }
        }
        self.sources
            .insert(source.name().to_string(), Arc::clone(&source));
        Ok(source)
    }

    /// 删除数据源，并级联删除引用它的映射；返回数据源是否存在
    pub fn delete_source(&mut self, name: &str) -> bool {
        let name = normalise_name(name);
        let removed = self.sources.remove(&name).is_some();

        let orphaned: Vec<ExtensionMapping> = self
            .mappings
            .iter()
            .filter(|m| m.source().name() == name)
            .cloned()
            .collect();
        for mapping in &orphaned {
            if self.delete_mapping(mapping) {
                debug!(
                    short_name = %self.id,
                    extension = mapping.extension().title(),
                    source = %name,
                    "cascading source delete to mapping"
                );
            }
        }
        removed
    }
}

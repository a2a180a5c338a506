//! 组织与用户目录记录
//!
use ipt_macros::value_object;
use uuid::Uuid;

/// 发布机构
#[value_object]
#[derive(Hash)]
pub struct Organisation {
    key: Uuid,
    name: Option<String>,
}

impl Organisation {
    pub fn new(key: Uuid, name: impl Into<String>) -> Self {
        Self {
            key,
            name: Some(name.into()),
        }
    }

    pub fn key(&self) -> Uuid {
        self.key
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// 平台用户，以邮箱作为身份
#[value_object]
#[derive(Hash, PartialOrd, Ord)]
pub struct User {
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// 展示名：有姓名时为“名 姓”，否则为邮箱
    pub fn display_name(&self) -> String {
        let names: Vec<&str> = [self.first_name(), self.last_name()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            self.email.clone()
        } else {
            names.join(" ")
        }
    }
}

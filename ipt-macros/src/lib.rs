//! `ipt-domain` 配套过程宏
//!
//! - `#[entity]`：追加 `id`/`revision` 字段并实现 `Entity`
//! - `#[entity_id]`：为单字段 tuple struct 生成标识类型的常用实现
//! - `#[value_object]`：合并值对象所需的派生
//! - `#[domain_event]`：为事件枚举追加 `id`/`aggregate_revision` 字段并实现 `DomainEvent`
//!
use proc_macro::TokenStream;

mod domain_event;
mod entity;
mod entity_id;
mod utils;
mod value_object;

/// 实体宏
///
/// 参数：`#[entity(id = IdType, debug = true|false)]`，`id` 默认 `String`。
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 实体 ID 宏，仅支持单字段 tuple struct，例如 `struct ShortName(String);`
///
/// 参数：`#[entity_id(debug = true|false)]`。
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 值对象宏，支持结构体与枚举
///
/// 参数：`#[value_object(debug = true|false, default = true|false)]`。
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 领域事件宏，仅支持具名字段变体的枚举
///
/// 参数：`#[domain_event(id = IdType, version = N)]`；
/// 变体可覆写：`#[event(event_type = "...", event_version = N)]`。
#[proc_macro_attribute]
pub fn domain_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    domain_event::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

use proc_macro2::Span;
use syn::punctuated::Punctuated;
use syn::{Attribute, Field, FieldsNamed, Ident, Path, Token, Type, parse_quote};

/// 合并必需派生与已有派生（按末段名去重，必需项在前），并将 derive 置于属性最前
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: &[Path]) -> syn::Result<()> {
    let mut derives: Vec<Path> = required.to_vec();
    let mut retained = Vec::with_capacity(attrs.len());

    for attr in attrs.drain(..) {
        if attr.path().is_ident("derive") {
            let listed = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
            for path in listed {
                if !derives.iter().any(|p| last_segment(p) == last_segment(&path)) {
                    derives.push(path);
                }
            }
        } else {
            retained.push(attr);
        }
    }

    attrs.push(parse_quote!(#[derive(#(#derives),*)]));
    attrs.extend(retained);
    Ok(())
}

fn last_segment(path: &Path) -> Option<String> {
    path.segments.last().map(|s| s.ident.to_string())
}

/// 确保具名字段包含 `required` 中的字段
/// - `reposition = true`：所需字段一律移到最前（entity）；
/// - `reposition = false`：仅在缺失时补到最前，已有字段保持原位（domain_event）。
pub(crate) fn ensure_leading_fields(
    fields: &mut FieldsNamed,
    required: &[(&str, &Type)],
    reposition: bool,
) {
    let existing = std::mem::take(&mut fields.named);
    let named_as = |field: &Field, name: &str| field.ident.as_ref().is_some_and(|i| i == name);

    let mut named: Punctuated<Field, Token![,]> = Punctuated::new();
    for (name, ty) in required {
        match existing.iter().find(|f| named_as(*f, *name)) {
            Some(field) if reposition => named.push(field.clone()),
            Some(_) => {}
            None => {
                let ident = Ident::new(*name, Span::call_site());
                named.push(parse_quote!(#ident: #ty));
            }
        }
    }

    for field in existing {
        let is_required = required.iter().any(|(name, _)| named_as(&field, *name));
        if reposition && is_required {
            continue;
        }
        named.push(field);
    }

    fields.named = named;
}

/// 解析 `key = true|false`
pub(crate) fn parse_flag(meta: &syn::meta::ParseNestedMeta) -> syn::Result<bool> {
    let lit: syn::LitBool = meta.value()?.parse()?;
    Ok(lit.value)
}

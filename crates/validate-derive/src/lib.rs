//! Derive macros for `plan_guard_domain::ValidateAttributes` and
//! `plan_guard_domain::Normalize`.
//!
//! Structs with named fields and enums whose variants wrap exactly one value
//! are supported. Field paths are the field name (or `attribute = "..."`);
//! variant paths are the snake-case variant name.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Attribute, Data, DataEnum, DeriveInput, Fields, FieldsNamed, Ident, LitInt, LitStr, Path,
};

/// Derive `plan_guard_domain::ValidateAttributes` with field-level checks.
///
/// Field attributes (all under `#[validate(...)]`, repeatable):
///
/// - `attribute = "name"` overrides the path segment
/// - `pattern = "Uuid"` checks against a `plan_guard_rules::Pattern`
/// - `length(min = 3, max = 63)` bounds the character count
/// - `with = "path::to::fn"` calls `fn(&AttributePath, &FieldTy) -> Diagnostics`
/// - `with_siblings = "path::to::fn"` also passes a `SiblingView` of the parent
/// - `nested` recurses into the field's own `ValidateAttributes` impl
#[proc_macro_derive(ValidateAttributes, attributes(validate))]
pub fn derive_validate_attributes(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_validate(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive `plan_guard_domain::Normalize`.
///
/// Field attributes (under `#[normalize(...)]`):
///
/// - `attribute = "name"` overrides the path segment
/// - `with = "path::to::fn"` calls `fn(FieldTy, &AttributePath) -> Normalized<FieldTy>`
/// - `nested` recurses into the field's own `Normalize` impl
///
/// Fields without a normalizer are moved through unchanged.
#[proc_macro_derive(Normalize, attributes(normalize))]
pub fn derive_normalize(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_normalize(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

// =============================================================================
// VALIDATE
// =============================================================================

#[derive(Debug)]
enum Check {
    Pattern(Ident),
    Length { min: LitInt, max: LitInt },
    With(Path),
    WithSiblings(Path),
    Nested,
}

fn expand_validate(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let name = &input.ident;
    let body = match &input.data {
        Data::Struct(struct_data) => {
            let fields = named_fields(&struct_data.fields, "ValidateAttributes")?;
            let mut checks = Vec::new();
            for field in &fields.named {
                let Some(ident) = field.ident.as_ref() else {
                    continue;
                };
                let (segment, field_checks) = parse_validate_attrs(&field.attrs, ident)?;
                if field_checks.is_empty() {
                    continue;
                }
                let segment = LitStr::new(&segment, Span::call_site());
                let calls = field_checks.iter().map(|check| expand_check(ident, check));
                checks.push(quote! {
                    {
                        let field_path = path.child(#segment);
                        #(#calls)*
                    }
                });
            }
            if checks.is_empty() {
                quote! {
                    let _ = path;
                    ::plan_guard_domain::Diagnostics::new()
                }
            } else {
                quote! {
                    let mut diagnostics = ::plan_guard_domain::Diagnostics::new();
                    #(#checks)*
                    diagnostics
                }
            }
        },
        Data::Enum(enum_data) => {
            let arms = variant_arms(enum_data, |variant, segment| {
                quote! {
                    Self::#variant(inner) => ::plan_guard_domain::ValidateAttributes::validate_attributes(
                        inner,
                        &path.child(#segment),
                    ),
                }
            })?;
            quote! {
                match self {
                    #(#arms)*
                }
            }
        },
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "ValidateAttributes cannot be derived for unions",
            ));
        },
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::plan_guard_domain::ValidateAttributes for #name #ty_generics #where_clause {
            fn validate_attributes(
                &self,
                path: &::plan_guard_domain::AttributePath,
            ) -> ::plan_guard_domain::Diagnostics {
                #body
            }
        }
    })
}

fn expand_check(ident: &Ident, check: &Check) -> proc_macro2::TokenStream {
    match check {
        Check::Pattern(pattern) => quote! {
            diagnostics.append(::plan_guard_rules::formats::matches_pattern(
                &field_path,
                &self.#ident,
                ::plan_guard_rules::Pattern::#pattern,
            ));
        },
        Check::Length { min, max } => quote! {
            diagnostics.append(::plan_guard_rules::formats::length_between(
                &field_path,
                &self.#ident,
                #min,
                #max,
            ));
        },
        Check::With(function) => quote! {
            diagnostics.append(#function(&field_path, &self.#ident));
        },
        Check::WithSiblings(function) => quote! {
            diagnostics.append(#function(
                &field_path,
                &self.#ident,
                &::plan_guard_domain::SiblingView::new(self, path),
            ));
        },
        Check::Nested => quote! {
            diagnostics.append(::plan_guard_domain::ValidateAttributes::validate_attributes(
                &self.#ident,
                &field_path,
            ));
        },
    }
}

fn parse_validate_attrs(
    attrs: &[Attribute],
    ident: &Ident,
) -> Result<(String, Vec<Check>), syn::Error> {
    let mut checks = Vec::new();
    let mut segment_override: Option<String> = None;
    for attr in attrs {
        if !attr.path().is_ident("validate") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("attribute") {
                let value: LitStr = meta.value()?.parse()?;
                if segment_override.is_some() {
                    return Err(meta.error("duplicate validate(attribute = ...)"));
                }
                segment_override = Some(value.value());
                return Ok(());
            }
            if meta.path.is_ident("pattern") {
                let value: LitStr = meta.value()?.parse()?;
                checks.push(Check::Pattern(value.parse()?));
                return Ok(());
            }
            if meta.path.is_ident("with") {
                let value: LitStr = meta.value()?.parse()?;
                checks.push(Check::With(value.parse()?));
                return Ok(());
            }
            if meta.path.is_ident("with_siblings") {
                let value: LitStr = meta.value()?.parse()?;
                checks.push(Check::WithSiblings(value.parse()?));
                return Ok(());
            }
            if meta.path.is_ident("nested") {
                checks.push(Check::Nested);
                return Ok(());
            }
            if meta.path.is_ident("length") {
                let mut min: Option<LitInt> = None;
                let mut max: Option<LitInt> = None;
                meta.parse_nested_meta(|nested| {
                    if nested.path.is_ident("min") {
                        min = Some(nested.value()?.parse()?);
                        return Ok(());
                    }
                    if nested.path.is_ident("max") {
                        max = Some(nested.value()?.parse()?);
                        return Ok(());
                    }
                    Err(nested.error("unsupported length attribute"))
                })?;
                let Some(min) = min else {
                    return Err(meta.error("length requires min"));
                };
                let Some(max) = max else {
                    return Err(meta.error("length requires max"));
                };
                checks.push(Check::Length { min, max });
                return Ok(());
            }
            Err(meta.error("unsupported validate attribute on field"))
        })?;
    }
    let segment = segment_override.unwrap_or_else(|| ident.to_string());
    Ok((segment, checks))
}

// =============================================================================
// NORMALIZE
// =============================================================================

#[derive(Debug)]
enum Normalizer {
    Keep,
    With(Path),
    Nested,
}

fn expand_normalize(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let name = &input.ident;
    let body = match &input.data {
        Data::Struct(struct_data) => {
            let fields = named_fields(&struct_data.fields, "Normalize")?;
            let mut idents = Vec::new();
            let mut steps = Vec::new();
            for field in &fields.named {
                let Some(ident) = field.ident.as_ref() else {
                    continue;
                };
                idents.push(ident);
                let (segment, normalizer) = parse_normalize_attrs(&field.attrs, ident)?;
                let segment = LitStr::new(&segment, Span::call_site());
                match normalizer {
                    Normalizer::Keep => {},
                    Normalizer::With(function) => steps.push(quote! {
                        let #ident = #function(#ident, &path.child(#segment))
                            .report_into(&mut diagnostics);
                    }),
                    Normalizer::Nested => steps.push(quote! {
                        let #ident = ::plan_guard_domain::Normalize::normalize(
                            #ident,
                            &path.child(#segment),
                        )
                        .report_into(&mut diagnostics);
                    }),
                }
            }
            if steps.is_empty() {
                return Ok(clean_normalize(input));
            }
            quote! {
                let mut diagnostics = ::plan_guard_domain::Diagnostics::new();
                let Self { #(#idents),* } = self;
                #(#steps)*
                ::plan_guard_domain::Normalized {
                    value: Self { #(#idents),* },
                    diagnostics,
                }
            }
        },
        Data::Enum(enum_data) => {
            let arms = variant_arms(enum_data, |variant, segment| {
                quote! {
                    Self::#variant(inner) => ::plan_guard_domain::Normalize::normalize(
                        inner,
                        &path.child(#segment),
                    )
                    .map(Self::#variant),
                }
            })?;
            quote! {
                match self {
                    #(#arms)*
                }
            }
        },
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Normalize cannot be derived for unions",
            ));
        },
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::plan_guard_domain::Normalize for #name #ty_generics #where_clause {
            fn normalize(
                self,
                path: &::plan_guard_domain::AttributePath,
            ) -> ::plan_guard_domain::Normalized<Self> {
                #body
            }
        }
    })
}

fn clean_normalize(input: &DeriveInput) -> proc_macro2::TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    quote! {
        impl #impl_generics ::plan_guard_domain::Normalize for #name #ty_generics #where_clause {
            fn normalize(
                self,
                _path: &::plan_guard_domain::AttributePath,
            ) -> ::plan_guard_domain::Normalized<Self> {
                ::plan_guard_domain::Normalized::clean(self)
            }
        }
    }
}

fn parse_normalize_attrs(
    attrs: &[Attribute],
    ident: &Ident,
) -> Result<(String, Normalizer), syn::Error> {
    let mut normalizer = Normalizer::Keep;
    let mut segment_override: Option<String> = None;
    for attr in attrs {
        if !attr.path().is_ident("normalize") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("attribute") {
                let value: LitStr = meta.value()?.parse()?;
                segment_override = Some(value.value());
                return Ok(());
            }
            if !matches!(normalizer, Normalizer::Keep) {
                return Err(meta.error("a field takes at most one normalizer"));
            }
            if meta.path.is_ident("with") {
                let value: LitStr = meta.value()?.parse()?;
                normalizer = Normalizer::With(value.parse()?);
                return Ok(());
            }
            if meta.path.is_ident("nested") {
                normalizer = Normalizer::Nested;
                return Ok(());
            }
            Err(meta.error("unsupported normalize attribute on field"))
        })?;
    }
    let segment = segment_override.unwrap_or_else(|| ident.to_string());
    Ok((segment, normalizer))
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

fn named_fields<'a>(fields: &'a Fields, derive: &str) -> Result<&'a FieldsNamed, syn::Error> {
    match fields {
        Fields::Named(named) => Ok(named),
        _ => Err(syn::Error::new_spanned(
            fields,
            format!("{derive} requires named fields"),
        )),
    }
}

fn variant_arms<F>(
    enum_data: &DataEnum,
    arm: F,
) -> Result<Vec<proc_macro2::TokenStream>, syn::Error>
where
    F: Fn(&Ident, &LitStr) -> proc_macro2::TokenStream,
{
    let mut arms = Vec::new();
    for variant in &enum_data.variants {
        let Fields::Unnamed(unnamed) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "enum variants must wrap exactly one value",
            ));
        };
        if unnamed.unnamed.len() != 1 {
            return Err(syn::Error::new_spanned(
                variant,
                "enum variants must wrap exactly one value",
            ));
        }
        let segment = LitStr::new(&snake_case(&variant.ident.to_string()), Span::call_site());
        arms.push(arm(&variant.ident, &segment));
    }
    Ok(arms)
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (position, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if position > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

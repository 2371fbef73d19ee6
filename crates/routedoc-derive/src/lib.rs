/*!
Procedural macros for routedoc schema inference.

`#[derive(ShapeDescriptor)]` implements `routedoc::ShapeDescriptor` for structs
and unit-only enums. Field names follow `#[serde(rename, rename_all)]`, skipped
fields (`#[serde(skip)]`) are left out, flattened fields (`#[serde(flatten)]`)
are merged into the parent, and doc comments become descriptions.
The `#[shape(...)]` attribute accepts `name`, `rename`, `rename_all` and `skip`
for types that do not go through serde.
*/

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    ext::IdentExt, meta::ParseNestedMeta, parse_macro_input, parse_quote, Attribute, Data,
    DataEnum, DeriveInput, Expr, ExprLit, Fields, FieldsNamed, FieldsUnnamed, Generics, Lit,
    LitStr, Meta, Token,
};

mod rename;

use rename::RenameRule;

/// Derive macro to implement ShapeDescriptor for structs and unit-only enums
#[proc_macro_derive(ShapeDescriptor, attributes(shape, serde))]
pub fn derive_shape_descriptor(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    generate_shape_impl(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Generate implementation for ShapeDescriptor trait
fn generate_shape_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let container = ContainerAttrs::parse(&input.attrs)?;
    let base_name = container
        .name
        .clone()
        .unwrap_or_else(|| name.unraw().to_string());
    let description = option_tokens(doc_string(&input.attrs));

    let body = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => named_struct_body(&base_name, description, fields, &container)?,
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => newtype_body(fields),
            Fields::Unnamed(fields) => tuple_struct_body(&base_name, description, fields),
            Fields::Unit => unit_struct_body(&base_name, description),
        },
        Data::Enum(data) => enum_body(&base_name, description, data, &container)?,
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "ShapeDescriptor cannot be derived for union types",
            ));
        }
    };

    let ShapeBody {
        kind,
        named,
        describe,
    } = body;

    let generics = add_trait_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let schema_name = if named {
        let labels = input.generics.type_params().map(|param| {
            let ident = &param.ident;
            quote! {
                name.push('_');
                name.push_str(&::routedoc::shape::type_label::<#ident>());
            }
        });
        quote! {
            fn schema_name() -> ::std::option::Option<::std::string::String> {
                #[allow(unused_mut)]
                let mut name = ::std::string::String::from(#base_name);
                #(#labels)*
                ::std::option::Option::Some(name)
            }
        }
    } else {
        TokenStream2::new()
    };

    Ok(quote! {
        impl #impl_generics ::routedoc::ShapeDescriptor for #name #ty_generics #where_clause {
            fn shape_kind() -> ::routedoc::ShapeKind {
                #kind
            }

            #schema_name

            #[allow(unused_mut, unused_variables)]
            fn describe(
                generator: &mut ::routedoc::SchemaGenerator,
            ) -> ::routedoc::OpenApiResult<::routedoc::specification::Schema> {
                #describe
            }
        }
    })
}

/// Pieces of a generated impl
struct ShapeBody {
    kind: TokenStream2,
    /// Whether the type gets a component schema of its own
    named: bool,
    describe: TokenStream2,
}

fn add_trait_bounds(mut generics: Generics) -> Generics {
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::routedoc::ShapeDescriptor));
    }
    generics
}

fn named_struct_body(
    type_name: &str,
    description: TokenStream2,
    fields: &FieldsNamed,
    container: &ContainerAttrs,
) -> syn::Result<ShapeBody> {
    let mut properties = Vec::new();

    for field in &fields.named {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;

        if attrs.flatten {
            properties.push(flattened_field(field_type, attrs.optional));
            continue;
        }

        let field_name = match attrs.rename {
            Some(rename) => rename,
            None => {
                let raw = ident.unraw().to_string();
                match container.rename_all {
                    Some(rule) => rule.apply_to_field(&raw),
                    None => raw,
                }
            }
        };

        let describe_field = match doc_string(&field.attrs) {
            Some(doc) => quote! {
                if schema.reference.is_none() {
                    schema.description = ::std::option::Option::Some(#doc.to_string());
                }
            },
            None => TokenStream2::new(),
        };

        let mark_required = if is_option_type(field_type) || attrs.optional {
            TokenStream2::new()
        } else {
            quote! { required.push(#field_name.to_string()); }
        };

        properties.push(quote! {
            {
                let mut schema = generator.generate::<#field_type>()?;
                #describe_field
                properties.insert(#field_name.to_string(), schema);
                #mark_required
            }
        });
    }

    Ok(ShapeBody {
        kind: quote!(::routedoc::ShapeKind::Struct),
        named: true,
        describe: quote! {
            let mut properties = ::std::collections::BTreeMap::new();
            let mut required = ::std::vec::Vec::new();
            let mut additional_properties = ::std::option::Option::None;
            #(#properties)*

            ::std::result::Result::Ok(::routedoc::specification::Schema {
                schema_type: ::std::option::Option::Some("object".to_string()),
                title: ::std::option::Option::Some(#type_name.to_string()),
                description: #description,
                properties,
                required,
                additional_properties,
                ..::std::default::Default::default()
            })
        },
    })
}

/// Merge the properties of a `#[serde(flatten)]` field into its parent
///
/// An `Option` or defaulted field contributes its properties but none of its
/// required names. A flattened map opens the parent to additional properties.
fn flattened_field(field_type: &syn::Type, optional: bool) -> TokenStream2 {
    let (inner_type, optional) = match option_inner_type(field_type) {
        Some(inner) => (inner, true),
        None => (field_type, optional),
    };

    let merge_required = if optional {
        TokenStream2::new()
    } else {
        quote! { required.extend(flattened.required); }
    };

    quote! {
        {
            let flattened = generator.generate_inline::<#inner_type>()?;
            properties.extend(flattened.properties);
            #merge_required
            if flattened.additional_properties.is_some() {
                additional_properties = flattened.additional_properties;
            }
        }
    }
}

/// Single field tuple structs are described as their inner type
fn newtype_body(fields: &FieldsUnnamed) -> ShapeBody {
    let inner = &fields.unnamed[0].ty;

    ShapeBody {
        kind: quote!(<#inner as ::routedoc::ShapeDescriptor>::shape_kind()),
        named: false,
        describe: quote! {
            generator.generate::<#inner>()
        },
    }
}

/// OpenAPI 3.0 has no tuple schema, so multi-field tuples become fixed-size
/// arrays. Distinct element schemas are combined with `oneOf`.
fn tuple_struct_body(
    type_name: &str,
    description: TokenStream2,
    fields: &FieldsUnnamed,
) -> ShapeBody {
    let field_count = fields.unnamed.len();
    let element_types: Vec<&syn::Type> = fields.unnamed.iter().map(|field| &field.ty).collect();
    let positions = element_types
        .iter()
        .map(|ty| quote!(#ty).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let items_description = format!("Tuple element, by position: ({})", positions);

    ShapeBody {
        kind: quote!(::routedoc::ShapeKind::Array),
        named: true,
        describe: quote! {
            let mut elements: ::std::vec::Vec<::routedoc::specification::Schema> =
                ::std::vec::Vec::new();
            #(
                {
                    let schema = generator.generate::<#element_types>()?;
                    if !elements.contains(&schema) {
                        elements.push(schema);
                    }
                }
            )*

            let items = if elements.len() == 1 {
                elements.remove(0)
            } else {
                ::routedoc::specification::Schema {
                    description: ::std::option::Option::Some(#items_description.to_string()),
                    one_of: elements,
                    ..::std::default::Default::default()
                }
            };

            ::std::result::Result::Ok(::routedoc::specification::Schema {
                schema_type: ::std::option::Option::Some("array".to_string()),
                title: ::std::option::Option::Some(#type_name.to_string()),
                description: #description,
                items: ::std::option::Option::Some(::std::boxed::Box::new(items)),
                min_items: ::std::option::Option::Some(#field_count),
                max_items: ::std::option::Option::Some(#field_count),
                ..::std::default::Default::default()
            })
        },
    }
}

fn unit_struct_body(type_name: &str, description: TokenStream2) -> ShapeBody {
    ShapeBody {
        kind: quote!(::routedoc::ShapeKind::Struct),
        named: true,
        describe: quote! {
            ::std::result::Result::Ok(::routedoc::specification::Schema {
                schema_type: ::std::option::Option::Some("object".to_string()),
                title: ::std::option::Option::Some(#type_name.to_string()),
                description: #description,
                ..::std::default::Default::default()
            })
        },
    }
}

/// Unit-only enums become string enums
fn enum_body(
    type_name: &str,
    description: TokenStream2,
    data: &DataEnum,
    container: &ContainerAttrs,
) -> syn::Result<ShapeBody> {
    let mut variants = Vec::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "ShapeDescriptor can only be derived for enums whose variants carry no data",
            ));
        }

        let attrs = FieldAttrs::parse(&variant.attrs)?;
        if attrs.skip {
            continue;
        }
        let value = match attrs.rename {
            Some(rename) => rename,
            None => {
                let raw = variant.ident.unraw().to_string();
                match container.rename_all {
                    Some(rule) => rule.apply_to_variant(&raw),
                    None => raw,
                }
            }
        };
        variants.push(value);
    }

    Ok(ShapeBody {
        kind: quote!(::routedoc::ShapeKind::Scalar),
        named: true,
        describe: quote! {
            ::std::result::Result::Ok(::routedoc::specification::Schema {
                schema_type: ::std::option::Option::Some("string".to_string()),
                title: ::std::option::Option::Some(#type_name.to_string()),
                description: #description,
                enum_values: ::std::vec![#(::routedoc::__private::serde_json::Value::String(#variants.to_string())),*],
                ..::std::default::Default::default()
            })
        },
    })
}

/// Attributes read from the type itself
#[derive(Default)]
struct ContainerAttrs {
    name: Option<String>,
    rename_all: Option<RenameRule>,
}

impl ContainerAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            let strict = attr.path().is_ident("shape");
            if !strict && !attr.path().is_ident("serde") {
                continue;
            }

            let result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    if meta.input.peek(Token![=]) {
                        let value: LitStr = meta.value()?.parse()?;
                        out.rename_all = Some(RenameRule::parse(&value)?);
                        return Ok(());
                    }
                    return skip_value(&meta);
                }
                if meta.path.is_ident("name") || meta.path.is_ident("rename") {
                    if meta.input.peek(Token![=]) {
                        let value: LitStr = meta.value()?.parse()?;
                        out.name = Some(value.value());
                        return Ok(());
                    }
                    return skip_value(&meta);
                }
                if strict {
                    return Err(meta.error("unknown shape attribute"));
                }
                skip_value(&meta)
            });

            // serde validates its own attributes
            if strict {
                result?;
            }
        }

        Ok(out)
    }
}

/// Attributes read from a field or an enum variant
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
    /// The field may be missing from the wire (`default`, `skip_serializing_if`)
    optional: bool,
    flatten: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            let strict = attr.path().is_ident("shape");
            if !strict && !attr.path().is_ident("serde") {
                continue;
            }

            let result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if meta.input.peek(Token![=]) {
                        let value: LitStr = meta.value()?.parse()?;
                        out.rename = Some(value.value());
                        return Ok(());
                    }
                    return skip_value(&meta);
                }
                if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    out.skip = true;
                    return Ok(());
                }
                if meta.path.is_ident("default") || meta.path.is_ident("skip_serializing_if") {
                    out.optional = true;
                    return skip_value(&meta);
                }
                if meta.path.is_ident("flatten") {
                    out.flatten = true;
                    return Ok(());
                }
                if strict {
                    return Err(meta.error("unknown shape attribute"));
                }
                skip_value(&meta)
            });

            if strict {
                result?;
            }
        }

        Ok(out)
    }
}

/// Consume the value of a nested meta item we do not interpret
fn skip_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let _content;
        syn::parenthesized!(_content in meta.input);
    }
    Ok(())
}

/// Joined doc comment text, if any
fn doc_string(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) => Some(text.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    let doc = lines.join("\n").trim().to_string();
    (!doc.is_empty()).then_some(doc)
}

fn option_tokens(value: Option<String>) -> TokenStream2 {
    match value {
        Some(text) => quote!(::std::option::Option::Some(#text.to_string())),
        None => quote!(::std::option::Option::None),
    }
}

/// The `T` of an `Option<T>` field type
fn option_inner_type(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

/// Helper function to check if a type is Option<T>
fn is_option_type(ty: &syn::Type) -> bool {
    if let syn::Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}

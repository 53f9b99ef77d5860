//! Procedural macros for declaring tool functions

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, punctuated::Punctuated, token::Comma, Attribute, Expr, ExprLit, FnArg,
    GenericArgument, Ident, ItemFn, Lit, Meta, Pat, PatType, PathArguments, ReturnType, Type,
};

/// Attribute macro generating tool metadata from a function
///
/// # Example
///
/// ```ignore
/// #[tool]
/// /// Get the current weather for a location.
/// fn get_weather(
///     /// City name, e.g. "Paris"
///     location: String,
///     #[default("celsius")]
///     unit: String,
/// ) -> Result<Weather, String> {
///     // Implementation
/// }
/// ```
///
/// This keeps the function as written and generates a module `get_weather_tool`
/// containing:
/// - `NAME`: the tool name
/// - `signature()`: the `FunctionSignature` (doc comments, parameters, defaults)
/// - `function()`: a `ToolFunction` ready for `ToolRegistry::register`
/// - `execute`: re-export of the original function
///
/// # Attributes
///
/// - `name`: (optional) Override the tool name (defaults to function name)
/// - `description`: (optional) Use instead of the function's doc comment
///
/// # Parameter attributes
///
/// - `/// doc comment`: the parameter's description in the schema
/// - `#[default(expr)]`: makes the parameter optional
///
/// `Option<T>` parameters are optional with a `null` default.
#[proc_macro_attribute]
pub fn tool(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr_args = parse_macro_input!(attr with Punctuated::<Meta, Comma>::parse_terminated);
    let input_fn = parse_macro_input!(item as ItemFn);

    match expand_tool(attr_args, input_fn) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// How a parameter is pulled out of the JSON arguments
enum Extraction {
    Required,
    Defaulted(Expr),
    Optional,
}

struct ParamInfo {
    ident: Ident,
    name: String,
    /// Type the JSON value is deserialized into
    owned_ty: Type,
    /// Passed as `&value` to the original function
    by_ref: bool,
    description: Option<String>,
    extraction: Extraction,
    type_hint: TokenStream2,
}

fn expand_tool(attr_args: Punctuated<Meta, Comma>, input_fn: ItemFn) -> syn::Result<TokenStream2> {
    let mut description = None;
    let mut tool_name = None;

    for arg in attr_args {
        match arg {
            Meta::NameValue(nv) if nv.path.is_ident("description") => {
                description = Some(string_literal(&nv.value)?);
            }
            Meta::NameValue(nv) if nv.path.is_ident("name") => {
                tool_name = Some(string_literal(&nv.value)?);
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "unsupported tool attribute; expected `name = \"...\"` or `description = \"...\"`",
                ));
            }
        }
    }

    let sig = &input_fn.sig;
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "#[tool] does not support generic parameters",
        ));
    }
    if let Some(FnArg::Receiver(receiver)) = sig.inputs.first() {
        return Err(syn::Error::new_spanned(
            receiver,
            "#[tool] functions cannot take `self`",
        ));
    }

    let fn_name = &sig.ident;
    let tool_name = tool_name.unwrap_or_else(|| fn_name.unraw().to_string());
    let doc = description.or_else(|| extract_doc_comments(&input_fn.attrs));

    let params = sig
        .inputs
        .iter()
        .map(|arg| match arg {
            FnArg::Typed(pat_type) => parse_param(pat_type),
            FnArg::Receiver(receiver) => Err(syn::Error::new_spanned(
                receiver,
                "#[tool] functions cannot take `self`",
            )),
        })
        .collect::<syn::Result<Vec<_>>>()?;

    // Parameter doc comments and #[default] are not valid on a plain fn
    let mut cleaned_fn = input_fn.clone();
    for arg in cleaned_fn.sig.inputs.iter_mut() {
        if let FnArg::Typed(pat_type) = arg {
            pat_type
                .attrs
                .retain(|attr| !attr.path().is_ident("default") && !attr.path().is_ident("doc"));
        }
    }

    let module_name = format_ident!("{}_tool", fn_name.unraw());
    let vis = &input_fn.vis;

    let doc_tokens = match &doc {
        Some(doc) => quote! { ::core::option::Option::Some(::std::string::String::from(#doc)) },
        None => quote! { ::core::option::Option::None },
    };

    let param_signatures = params.iter().map(|param| {
        let name = &param.name;
        let hint = &param.type_hint;
        let desc = match &param.description {
            Some(d) => quote! { .with_description(#d) },
            None => quote! {},
        };
        let default = match &param.extraction {
            Extraction::Required => quote! {},
            Extraction::Defaulted(expr) => quote! {
                .with_default(::toolvault::__private::serde_json::json!(#expr))
            },
            Extraction::Optional => quote! {
                .with_default(::toolvault::__private::serde_json::Value::Null)
            },
        };
        quote! {
            ::toolvault::ParamSignature::new(#name, #hint) #desc #default
        }
    });

    let extractions = params.iter().map(|param| {
        let ident = &param.ident;
        let name = &param.name;
        let ty = &param.owned_ty;
        match &param.extraction {
            Extraction::Required => quote! {
                let #ident: #ty = __call.get_param(#name)?;
            },
            Extraction::Defaulted(expr) => quote! {
                let #ident: #ty = match __call.get_optional_param(#name)? {
                    ::core::option::Option::Some(__value) => __value,
                    // Same JSON value the signature advertises
                    ::core::option::Option::None => ::toolvault::__private::serde_json::from_value::<#ty>(
                        ::toolvault::__private::serde_json::json!(#expr),
                    )
                    .map_err(|__err| {
                        ::toolvault::ToolError::parameter(::std::format!(
                            "Invalid default for parameter '{}': {}",
                            #name,
                            __err
                        ))
                    })?,
                };
            },
            Extraction::Optional => quote! {
                let #ident: #ty = __call.get_optional_param(#name)?;
            },
        }
    });

    let call_args = params.iter().map(|param| {
        let ident = &param.ident;
        if param.by_ref {
            quote! { &#ident }
        } else {
            quote! { #ident }
        }
    });

    let call_preamble = if params.is_empty() {
        quote! {}
    } else {
        quote! {
            let __call = ::toolvault::FunctionCall::from_value(NAME, __args)?;
        }
    };
    let args_binding = if params.is_empty() {
        quote! { _args }
    } else {
        quote! { __args }
    };

    let await_token = if sig.asyncness.is_some() {
        quote! { .await }
    } else {
        quote! {}
    };
    let call = quote! { super::#fn_name(#(#call_args),*) #await_token };

    let result_handling = match &sig.output {
        ReturnType::Default => quote! {
            #call;
            ::core::result::Result::Ok(::toolvault::__private::serde_json::Value::Null)
        },
        ReturnType::Type(_, ty) if is_result_type(ty) => quote! {
            match #call {
                ::core::result::Result::Ok(__value) => {
                    ::core::result::Result::Ok(::toolvault::__private::serde_json::to_value(__value)?)
                }
                ::core::result::Result::Err(__err) => {
                    ::core::result::Result::Err(::toolvault::ToolError::execution(__err.to_string()))
                }
            }
        },
        ReturnType::Type(..) => quote! {
            ::core::result::Result::Ok(::toolvault::__private::serde_json::to_value(#call)?)
        },
    };

    Ok(quote! {
        #cleaned_fn

        #[allow(dead_code)]
        #vis mod #module_name {
            #[allow(unused_imports)]
            use super::*;

            /// The name of this tool
            pub const NAME: &str = #tool_name;

            /// The signature this tool's schema is extracted from
            pub fn signature() -> ::toolvault::FunctionSignature {
                ::toolvault::FunctionSignature {
                    name: ::std::string::String::from(NAME),
                    doc: #doc_tokens,
                    params: ::std::vec![#(#param_signatures),*],
                }
            }

            /// The original function
            #[allow(unused_imports)]
            pub(super) use super::#fn_name as execute;

            async fn __invoke(
                #args_binding: ::toolvault::__private::serde_json::Value,
            ) -> ::core::result::Result<::toolvault::__private::serde_json::Value, ::toolvault::ToolError> {
                #call_preamble
                #(#extractions)*
                #result_handling
            }

            /// A `ToolFunction` ready for registration
            pub fn function() -> ::toolvault::ToolFunction {
                ::toolvault::ToolFunction::new(signature(), __invoke)
            }
        }
    })
}

fn string_literal(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.value()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

/// Doc comment lines, trimmed and joined with newlines
fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(meta) = &attr.meta {
            if let Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) = &meta.value
            {
                docs.push(lit_str.value().trim().to_string());
            }
        }
    }

    let joined = docs.join("\n").trim().to_string();
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn parse_param(pat_type: &PatType) -> syn::Result<ParamInfo> {
    let ident = match &*pat_type.pat {
        Pat::Ident(pat_ident) => pat_ident.ident.clone(),
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "#[tool] parameters must be plain identifiers",
            ));
        }
    };

    let mut default = None;
    for attr in &pat_type.attrs {
        if attr.path().is_ident("default") {
            default = Some((attr.parse_args::<Expr>()?, attr));
        }
    }

    let ty = &*pat_type.ty;
    let (owned_ty, by_ref) = match ty {
        Type::Reference(reference) => {
            if reference.mutability.is_some() {
                return Err(syn::Error::new_spanned(
                    reference,
                    "#[tool] parameters cannot be mutable references",
                ));
            }
            if is_named(&reference.elem, "str") {
                (syn::parse_quote!(::std::string::String), true)
            } else {
                ((*reference.elem).clone(), true)
            }
        }
        _ => (ty.clone(), false),
    };

    let (extraction, hint_ty) = match (option_inner(ty), default) {
        (Some(_), Some((_, attr))) => {
            return Err(syn::Error::new_spanned(
                attr,
                "#[default] cannot be used on an `Option` parameter; it already defaults to `None`",
            ));
        }
        (Some(inner), None) => (Extraction::Optional, inner.clone()),
        (None, Some((expr, _))) => (Extraction::Defaulted(expr), ty.clone()),
        (None, None) => (Extraction::Required, ty.clone()),
    };

    Ok(ParamInfo {
        name: ident.unraw().to_string(),
        ident,
        owned_ty,
        by_ref,
        description: extract_doc_comments(&pat_type.attrs),
        extraction,
        type_hint: type_hint(&hint_ty),
    })
}

/// `TypeHint` expression for a Rust type
fn type_hint(ty: &Type) -> TokenStream2 {
    let ty = strip_type_modifiers(ty);
    let ident = match ty {
        Type::Path(type_path) => type_path.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    };

    match ident.as_deref() {
        Some("String" | "str" | "char") => quote! { ::toolvault::TypeHint::Text },
        Some(
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize",
        ) => quote! { ::toolvault::TypeHint::Integer },
        Some("f32" | "f64") => quote! { ::toolvault::TypeHint::Float },
        Some("bool") => quote! { ::toolvault::TypeHint::Boolean },
        _ => {
            let name = quote!(#ty).to_string().replace(' ', "");
            quote! { ::toolvault::TypeHint::Other(::std::string::String::from(#name)) }
        }
    }
}

/// Strip reference and other modifiers from a type to get the base type
fn strip_type_modifiers(ty: &Type) -> &Type {
    match ty {
        Type::Reference(type_ref) => strip_type_modifiers(&type_ref.elem),
        Type::Paren(paren) => strip_type_modifiers(&paren.elem),
        _ => ty,
    }
}

fn is_named(ty: &Type, name: &str) -> bool {
    matches!(ty, Type::Path(type_path) if type_path.path.is_ident(name))
}

/// `T` from `Option<T>`
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match &args.args[0] {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

fn is_result_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Result"),
        _ => false,
    }
}

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, Lit, Meta, Path, Token, ext::IdentExt,
    parse_macro_input, punctuated::Punctuated,
};

/// Check if the struct already derives `Default`
fn derives_default(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("derive")
            && attr
                .parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)
                .map(|paths| {
                    paths.iter().any(|path| {
                        path.segments
                            .last()
                            .is_some_and(|segment| segment.ident == "Default")
                    })
                })
                .unwrap_or(false)
    })
}

/// Define a configuration struct that can be bound from a `ConfigSource`
///
/// Every field is read from the variable named after it in uppercase. The
/// field type decides the kind (`String`, `bool` or any primitive integer);
/// other types fail to compile. `#[field(example = ...)]` attaches an example
/// shown in diagnostics and generated docs.
#[proc_macro]
pub fn define_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_config(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_config(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let vis = &input.vis;
    let struct_attrs = &input.attrs;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "define_config! does not support generic structs",
        ));
    }

    // Extract fields from the struct
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "define_config! only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "define_config! only supports structs",
            ));
        }
    };

    let mut field_defs = Vec::new();
    let mut descriptor_pushes = Vec::new();
    let mut assign_arms = Vec::new();
    let mut default_fields = Vec::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let field_vis = &field.vis;
        let field_type = &field.ty;
        let name = field_name.unraw().to_string();

        let config = parse_field_config(&field.attrs)?;

        // Extract cfg attributes for feature gating
        let cfg_attrs: Vec<&Attribute> = field
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("cfg"))
            .collect();

        // Everything except our own #[field(...)] stays on the struct field
        let kept_attrs: Vec<&Attribute> = field
            .attrs
            .iter()
            .filter(|attr| !attr.path().is_ident("field"))
            .collect();

        field_defs.push(quote! {
            #(#kept_attrs)*
            #field_vis #field_name: #field_type
        });

        let with_example = config
            .example
            .map(|example| quote! { .with_example(#example) });
        descriptor_pushes.push(quote! {
            #(#cfg_attrs)*
            fields.push(
                ::envbind::FieldDescriptor::new(
                    #name,
                    <#field_type as ::envbind::FromValue>::KIND,
                )
                #with_example
            );
        });

        assign_arms.push(quote! {
            #(#cfg_attrs)*
            #name => {
                self.#field_name = <#field_type as ::envbind::FromValue>::from_value(value)?;
                ::core::result::Result::Ok(())
            }
        });

        default_fields.push(quote! {
            #(#cfg_attrs)*
            #field_name: ::core::default::Default::default()
        });
    }

    // Generate the struct definition
    let struct_def = quote! {
        #(#struct_attrs)*
        #vis struct #struct_name {
            #(#field_defs),*
        }
    };

    let default_impl = if derives_default(struct_attrs) {
        quote! {}
    } else {
        quote! {
            impl ::core::default::Default for #struct_name {
                fn default() -> Self {
                    Self {
                        #(#default_fields),*
                    }
                }
            }
        }
    };

    // Generate Bind trait implementation
    let bind_impl = quote! {
        impl ::envbind::Bind for #struct_name {
            fn fields() -> ::std::vec::Vec<::envbind::FieldDescriptor> {
                #[allow(unused_mut)]
                let mut fields = ::std::vec::Vec::new();

                #(#descriptor_pushes)*

                fields
            }

            fn assign(
                &mut self,
                field: &str,
                value: ::envbind::Value,
            ) -> ::core::result::Result<(), ::envbind::Value> {
                match field {
                    #(#assign_arms)*
                    _ => ::core::result::Result::Err(value),
                }
            }
        }
    };

    Ok(quote! {
        #struct_def
        #default_impl
        #bind_impl
    })
}

#[derive(Debug, Default)]
struct FieldConfig {
    example: Option<String>,
}

/// Render an example literal as the string shown to operators
fn example_string(lit: &Lit) -> syn::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        _ => Err(syn::Error::new_spanned(
            lit,
            "example must be a string, integer or bool literal",
        )),
    }
}

/// Parse the optional #[field(example = ...)] attribute
fn parse_field_config(attrs: &[Attribute]) -> syn::Result<FieldConfig> {
    let mut config = FieldConfig::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("field")) {
        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new_spanned(
                attr,
                "field attribute must be a list: #[field(example = ...)]",
            ));
        };

        list.parse_nested_meta(|meta| {
            if meta.path.is_ident("example") {
                let lit: Lit = meta.value()?.parse()?;
                config.example = Some(example_string(&lit)?);
                Ok(())
            } else {
                Err(meta.error("unknown field option, expected `example`"))
            }
        })?;
    }

    Ok(config)
}

use proc_macro::TokenStream;
use quote::quote;

/// Derive input reduced to what the generated impls need
struct MetaType {
    ident: syn::Ident,
    /// Descriptor name, `#[rtti(name = "...")]` or the Rust ident
    type_name: String,
    /// Fields marked `#[rtti(base)]`, in declaration order
    bases: Vec<syn::Member>,
}

fn is_rtti_attr(attr: &syn::Attribute) -> bool {
    attr.path().is_ident("rtti")
}

fn parse_type_name(input: &syn::DeriveInput) -> syn::Result<String> {
    let mut type_name = input.ident.to_string();

    for attr in input.attrs.iter().filter(|attr| is_rtti_attr(attr)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let name: syn::LitStr = meta.value()?.parse()?;
                type_name = name.value();
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(type_name)
}

fn is_base_field(field: &syn::Field) -> syn::Result<bool> {
    let mut is_base = false;

    for attr in field.attrs.iter().filter(|attr| is_rtti_attr(attr)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("base") {
                is_base = true;
                Ok(())
            } else {
                Err(meta.error("expected `base`"))
            }
        })?;
    }

    Ok(is_base)
}

impl MetaType {
    fn new(input: &syn::DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "RttiObject can't be derived for generic types",
            ));
        }

        let fields = match &input.data {
            syn::Data::Struct(syn::DataStruct { fields, .. }) => fields,
            syn::Data::Enum(data) => {
                return Err(syn::Error::new_spanned(
                    data.enum_token,
                    "RttiObject can only be derived for structs",
                ))
            }
            syn::Data::Union(data) => {
                return Err(syn::Error::new_spanned(
                    data.union_token,
                    "RttiObject can only be derived for structs",
                ))
            }
        };

        let mut bases = Vec::new();
        for (index, field) in fields.iter().enumerate() {
            if !is_base_field(field)? {
                continue;
            }

            bases.push(match &field.ident {
                Some(ident) => syn::Member::Named(ident.clone()),
                None => syn::Member::Unnamed(syn::Index::from(index)),
            });
        }

        Ok(Self {
            ident: input.ident.clone(),
            type_name: parse_type_name(input)?,
            bases,
        })
    }
}

mod gen {
    use quote::quote;

    use super::MetaType;

    // Returns `self` if it is the requested type, otherwise asks every base in turn
    pub fn create_view_method(meta: &MetaType, is_mut: bool) -> proc_macro2::TokenStream {
        let bases = &meta.bases;

        let (method, reference) = match is_mut {
            true => (quote! {view_mut}, quote! {&mut}),
            false => (quote! {view}, quote! {&}),
        };

        quote! {
            fn #method(
                #reference self,
                target: ::std::any::TypeId,
            ) -> ::std::option::Option<#reference dyn ::std::any::Any> {
                if target == ::std::any::TypeId::of::<Self>() {
                    return ::std::option::Option::Some(self);
                }

                #(
                    if let ::std::option::Option::Some(found) =
                        ::decima_rtti_core::RttiObject::#method(#reference self.#bases, target)
                    {
                        return ::std::option::Option::Some(found);
                    }
                )*

                ::std::option::Option::None
            }
        }
    }
}

/// Implements `RttiType` and `RttiObject`
///
/// `#[rtti(name = "...")]` overrides the descriptor name, `#[rtti(base)]` marks embedded
/// base objects that casts may hand out
#[proc_macro_derive(RttiObject, attributes(rtti))]
pub fn rtti_object_derive(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);

    let meta = match MetaType::new(&ast) {
        Ok(meta) => meta,
        Err(err) => return err.to_compile_error().into(),
    };

    let ty_ident = &meta.ident;
    let type_name = &meta.type_name;

    let view = gen::create_view_method(&meta, false);
    let view_mut = gen::create_view_method(&meta, true);

    let tokens = quote! {
        #[automatically_derived]
        impl ::decima_rtti_core::RttiType for #ty_ident {
            const TYPE_NAME: &'static str = #type_name;
        }

        #[automatically_derived]
        impl ::decima_rtti_core::RttiObject for #ty_ident {
            fn type_name(&self) -> &'static str {
                <Self as ::decima_rtti_core::RttiType>::TYPE_NAME
            }

            #view
            #view_mut
        }
    }
    .into();
    tokens
}

//! Derive macros for `canonwire-codec`.
//!
//! `#[derive(SizeHint, Marshal, Unmarshal)]` generates the sequential,
//! declaration-order field encoding: fields are written back to back with
//! no tags or per-field framing, so the wire format is closed over the
//! field list and only strict appends at the end of a struct are a
//! compatible change. Enums carry a single leading byte holding the
//! variant's declaration index.
//!
//! A field annotated `#[canonwire(skip)]` is not part of the visible
//! schema: it is never written, and decoding rebuilds it with
//! `Default::default()`.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, Data, DataEnum, DataStruct, DeriveInput, Field, Fields, GenericParam,
    Generics, Index, Meta, NestedMeta,
};

/// Returns true if the field is marked `#[canonwire(skip)]`.
fn is_skipped(field: &Field) -> bool {
    field.attrs.iter().any(|attr| {
        if !attr.path.is_ident("canonwire") {
            return false;
        }
        match attr.parse_meta() {
            Ok(Meta::List(list)) => list.nested.iter().any(|nested| {
                matches!(nested, NestedMeta::Meta(Meta::Path(path)) if path.is_ident("skip"))
            }),
            _ => false,
        }
    })
}

/// Adds `bound` to every type parameter of the deriving type.
fn with_bound(mut generics: Generics, bound: &str) -> Generics {
    let bound: syn::TypeParamBound = syn::parse_str(bound).expect("invalid bound");
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(bound.clone());
        }
    }
    generics
}

/// Checks that an enum is small enough for the one-byte variant index.
fn check_variant_count(data: &DataEnum) -> Result<(), syn::Error> {
    if data.variants.len() > u8::MAX as usize + 1 {
        return Err(syn::Error::new_spanned(
            &data.variants,
            "enums with more than 256 variants are not supported",
        ));
    }
    Ok(())
}

/// Derives `canonwire_codec::SizeHint`.
#[proc_macro_derive(SizeHint, attributes(canonwire))]
pub fn derive_size_hint(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let generics = with_bound(input.generics.clone(), "::canonwire_codec::SizeHint");
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(DataStruct { fields, .. }) => {
            let terms = fields.iter().enumerate().filter(|(_, f)| !is_skipped(f)).map(
                |(index, field)| {
                    let accessor = member(field, index);
                    quote! { + ::canonwire_codec::SizeHint::size_hint(&self.#accessor) }
                },
            );
            quote! { 0usize #(#terms)* }
        }
        Data::Enum(data) => {
            if let Err(err) = check_variant_count(data) {
                return err.to_compile_error().into();
            }
            let arms = data.variants.iter().map(|variant| {
                let ident = &variant.ident;
                let (pattern, bindings) = variant_pattern(&variant.fields);
                let terms = bindings.iter().map(|binding| {
                    quote! { + ::canonwire_codec::SizeHint::size_hint(#binding) }
                });
                quote! { Self::#ident #pattern => 1usize #(#terms)*, }
            });
            quote! { match self { #(#arms)* } }
        }
        Data::Union(_) => {
            return syn::Error::new_spanned(name, "unions are not supported")
                .to_compile_error()
                .into();
        }
    };

    quote! {
        impl #impl_generics ::canonwire_codec::SizeHint for #name #ty_generics #where_clause {
            fn size_hint(&self) -> usize {
                #body
            }
        }
    }
    .into()
}

/// Derives `canonwire_codec::Marshal`.
#[proc_macro_derive(Marshal, attributes(canonwire))]
pub fn derive_marshal(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let generics = with_bound(input.generics.clone(), "::canonwire_codec::Marshal");
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(DataStruct { fields, .. }) => {
            let writes = fields.iter().enumerate().filter(|(_, f)| !is_skipped(f)).map(
                |(index, field)| {
                    let accessor = member(field, index);
                    quote! { ::canonwire_codec::Marshal::marshal(&self.#accessor, buf, quota)?; }
                },
            );
            quote! { #(#writes)* }
        }
        Data::Enum(data) => {
            if let Err(err) = check_variant_count(data) {
                return err.to_compile_error().into();
            }
            let arms = data.variants.iter().enumerate().map(|(index, variant)| {
                let ident = &variant.ident;
                let tag = index as u8;
                let (pattern, bindings) = variant_pattern(&variant.fields);
                let writes = bindings.iter().map(|binding| {
                    quote! { ::canonwire_codec::Marshal::marshal(#binding, buf, quota)?; }
                });
                quote! {
                    Self::#ident #pattern => {
                        ::canonwire_codec::Marshal::marshal(&#tag, buf, quota)?;
                        #(#writes)*
                    }
                }
            });
            quote! { match self { #(#arms)* } }
        }
        Data::Union(_) => {
            return syn::Error::new_spanned(name, "unions are not supported")
                .to_compile_error()
                .into();
        }
    };

    quote! {
        impl #impl_generics ::canonwire_codec::Marshal for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn marshal(
                &self,
                buf: &mut impl ::canonwire_codec::bytes::BufMut,
                quota: &mut ::canonwire_codec::Quota,
            ) -> ::core::result::Result<(), ::canonwire_codec::Error> {
                #body
                Ok(())
            }
        }
    }
    .into()
}

/// Derives `canonwire_codec::Unmarshal`.
#[proc_macro_derive(Unmarshal, attributes(canonwire))]
pub fn derive_unmarshal(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let generics = with_bound(input.generics.clone(), "::canonwire_codec::Unmarshal");
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(DataStruct { fields, .. }) => construct(quote! { Self }, fields),
        Data::Enum(data) => {
            if let Err(err) = check_variant_count(data) {
                return err.to_compile_error().into();
            }
            let arms = data.variants.iter().enumerate().map(|(index, variant)| {
                let ident = &variant.ident;
                let tag = index as u8;
                let build = construct(quote! { Self::#ident }, &variant.fields);
                quote! { #tag => { #build } }
            });
            quote! {
                let tag = <u8 as ::canonwire_codec::Unmarshal>::unmarshal(buf, quota)?;
                match tag {
                    #(#arms)*
                    _ => Err(::canonwire_codec::Error::InvalidVariant(tag)),
                }
            }
        }
        Data::Union(_) => {
            return syn::Error::new_spanned(name, "unions are not supported")
                .to_compile_error()
                .into();
        }
    };

    quote! {
        impl #impl_generics ::canonwire_codec::Unmarshal for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn unmarshal(
                buf: &mut impl ::canonwire_codec::bytes::Buf,
                quota: &mut ::canonwire_codec::Quota,
            ) -> ::core::result::Result<Self, ::canonwire_codec::Error> {
                #body
            }
        }
    }
    .into()
}

/// Names the field for `self.<member>` access.
fn member(field: &Field, index: usize) -> proc_macro2::TokenStream {
    match &field.ident {
        Some(ident) => quote! { #ident },
        None => {
            let index = Index::from(index);
            quote! { #index }
        }
    }
}

/// Builds a match pattern binding every non-skipped field of a variant,
/// returning the pattern and the bound identifiers in declaration order.
fn variant_pattern(fields: &Fields) -> (proc_macro2::TokenStream, Vec<proc_macro2::Ident>) {
    match fields {
        Fields::Named(named) => {
            let mut bindings = Vec::new();
            let entries = named.named.iter().map(|field| {
                let ident = field.ident.as_ref().expect("named field");
                if is_skipped(field) {
                    quote! { #ident: _ }
                } else {
                    bindings.push(ident.clone());
                    quote! { #ident }
                }
            });
            (quote! { { #(#entries),* } }, bindings)
        }
        Fields::Unnamed(unnamed) => {
            let mut bindings = Vec::new();
            let entries = unnamed.unnamed.iter().enumerate().map(|(index, field)| {
                if is_skipped(field) {
                    quote! { _ }
                } else {
                    let ident = format_ident!("field_{}", index);
                    bindings.push(ident.clone());
                    quote! { #ident }
                }
            });
            (quote! { ( #(#entries),* ) }, bindings)
        }
        Fields::Unit => (quote! {}, Vec::new()),
    }
}

/// Builds an `Ok(<path> { ... })` expression decoding every field in
/// declaration order; skipped fields are rebuilt with `Default::default()`.
fn construct(path: proc_macro2::TokenStream, fields: &Fields) -> proc_macro2::TokenStream {
    match fields {
        Fields::Named(named) => {
            let entries = named.named.iter().map(|field| {
                let ident = field.ident.as_ref().expect("named field");
                if is_skipped(field) {
                    quote! { #ident: ::core::default::Default::default() }
                } else {
                    quote! { #ident: ::canonwire_codec::Unmarshal::unmarshal(buf, quota)? }
                }
            });
            quote! { Ok(#path { #(#entries),* }) }
        }
        Fields::Unnamed(unnamed) => {
            let entries = unnamed.unnamed.iter().map(|field| {
                if is_skipped(field) {
                    quote! { ::core::default::Default::default() }
                } else {
                    quote! { ::canonwire_codec::Unmarshal::unmarshal(buf, quota)? }
                }
            });
            quote! { Ok(#path ( #(#entries),* )) }
        }
        Fields::Unit => quote! { Ok(#path) },
    }
}

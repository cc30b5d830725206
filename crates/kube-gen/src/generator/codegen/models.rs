use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::CodegenPaths;
use crate::generator::{
  ast::{FieldAccess, HasMetadataImpl, ModelDef, PropertyDef, TypeMetaImpl},
  types::TypeRef,
};

pub(crate) struct StructGenerator<'a> {
  paths: &'a CodegenPaths,
}

impl<'a> StructGenerator<'a> {
  pub(crate) fn new(paths: &'a CodegenPaths) -> Self {
    Self { paths }
  }

  pub(crate) fn generate(&self, def: &ModelDef) -> TokenStream {
    let struct_def = self.generate_struct(def);
    let resource = self.generate_resource_impl(def);
    let type_meta = def
      .type_meta
      .as_ref()
      .map(|type_meta| self.generate_type_meta_impl(def, type_meta));
    let metadata = def
      .metadata
      .as_ref()
      .map(|metadata| self.generate_metadata_impl(def, metadata));

    quote! {
      #struct_def
      #resource
      #type_meta
      #metadata
    }
  }

  fn generate_struct(&self, def: &ModelDef) -> TokenStream {
    let name = format_ident!("{}", def.ty.type_name());
    let docs = &def.docs;
    let fields = def.properties.iter().map(|property| self.generate_field(def, property));

    quote! {
      #docs
      #[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize, bon::Builder)]
      pub struct #name {
        #(#fields),*
      }
    }
  }

  fn generate_field(&self, def: &ModelDef, property: &PropertyDef) -> TokenStream {
    let name = format_ident!("{}", property.field_name);
    let docs = &property.docs;

    let mut ty = self.paths.render(&property.ty, Some(&def.ty.package));
    if property.boxed {
      ty = quote! { Box<#ty> };
    }

    let mut serde_args = vec![];
    if property.field_name.trim_start_matches("r#") != property.json_name {
      let json_name = &property.json_name;
      serde_args.push(quote! { rename = #json_name });
    }
    if !property.required {
      ty = quote! { Option<#ty> };
      serde_args.push(quote! { skip_serializing_if = "Option::is_none" });
    }
    let serde_attr = (!serde_args.is_empty()).then(|| quote! { #[serde(#(#serde_args),*)] });

    quote! {
      #docs
      #serde_attr
      pub #name: #ty
    }
  }

  fn generate_resource_impl(&self, def: &ModelDef) -> Option<TokenStream> {
    let gvk = def.resource.as_ref()?;
    let name = format_ident!("{}", def.ty.type_name());
    let support = self.paths.support();
    let (group, version, kind) = (&gvk.group, &gvk.version, &gvk.kind);

    Some(quote! {
      impl #support::Resource for #name {
        const GROUP: &'static str = #group;
        const VERSION: &'static str = #version;
        const KIND: &'static str = #kind;
      }
    })
  }

  fn generate_type_meta_impl(&self, def: &ModelDef, type_meta: &TypeMetaImpl) -> TokenStream {
    let name = format_ident!("{}", def.ty.type_name());
    let support = self.paths.support();
    let kind = str_accessor(&type_meta.kind);
    let api_version = str_accessor(&type_meta.api_version);

    quote! {
      impl #support::TypeMeta for #name {
        fn kind(&self) -> Option<&str> {
          #kind
        }

        fn api_version(&self) -> Option<&str> {
          #api_version
        }
      }
    }
  }

  fn generate_metadata_impl(&self, def: &ModelDef, metadata: &HasMetadataImpl) -> TokenStream {
    let name = format_ident!("{}", def.ty.type_name());
    let support = self.paths.support();
    let meta = self
      .paths
      .render(&TypeRef::Named(metadata.meta.clone()), Some(&def.ty.package));
    let field = format_ident!("{}", metadata.field.field_name);
    let accessor = if metadata.field.optional {
      quote! { self.#field.as_ref() }
    } else {
      quote! { Some(&self.#field) }
    };

    quote! {
      impl #support::HasMetadata for #name {
        type Meta = #meta;

        fn metadata(&self) -> Option<&Self::Meta> {
          #accessor
        }
      }
    }
  }
}

fn str_accessor(access: &FieldAccess) -> TokenStream {
  let field = format_ident!("{}", access.field_name);
  if access.optional {
    quote! { self.#field.as_deref() }
  } else {
    quote! { Some(self.#field.as_str()) }
  }
}

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Ident, LitStr, Path};

#[derive(Default)]
struct ConvertibleArgs {
  class: Option<LitStr>,
  extends: Option<Path>,
  delegate: Option<Ident>,
  methods: Vec<Ident>,
}

fn parse_args(input: &DeriveInput) -> syn::Result<ConvertibleArgs> {
  let mut args = ConvertibleArgs::default();
  for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("convertible")) {
    attr.parse_nested_meta(|meta| {
      if meta.path.is_ident("class") {
        args.class = Some(meta.value()?.parse()?);
        Ok(())
      } else if meta.path.is_ident("extends") {
        args.extends = Some(meta.value()?.parse()?);
        Ok(())
      } else if meta.path.is_ident("delegate") {
        args.delegate = Some(meta.value()?.parse()?);
        Ok(())
      } else if meta.path.is_ident("methods") {
        meta.parse_nested_meta(|method| {
          let name = method
            .path
            .get_ident()
            .cloned()
            .ok_or_else(|| method.error("expected an accessor name"))?;
          args.methods.push(name);
          Ok(())
        })
      } else {
        Err(meta.error("unsupported convertible attribute, expected one of: class, extends, delegate, methods"))
      }
    })?;
  }
  if args.delegate.is_some() && args.extends.is_none() {
    return Err(syn::Error::new_spanned(
      &input.ident,
      "`delegate` requires `extends` naming the delegate's type",
    ));
  }
  Ok(args)
}

/// Implements `Convertible` and `ConvertibleClass`.
///
/// ```ignore
/// #[derive(Debug, Convertible)]
/// #[convertible(class = "app::Admin", extends = User, delegate = user, methods(to_array))]
/// struct Admin { user: User, level: u8 }
/// ```
///
/// Accessors listed in `methods` must have the signature `fn(&self) -> AccessorResult`. Names not
/// listed are forwarded to the `delegate` field when one is given.
#[proc_macro_derive(Convertible, attributes(convertible))]
pub fn derive_convertible(input: TokenStream) -> TokenStream {
  let input = parse_macro_input!(input as DeriveInput);
  let args = match parse_args(&input) {
    Ok(args) => args,
    Err(err) => return err.to_compile_error().into(),
  };

  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

  let class = match &args.class {
    Some(class) => quote! { #class },
    None => quote! { concat!(module_path!(), "::", stringify!(#name)) },
  };

  let ancestry = match &args.extends {
    Some(parent) => quote! {
      let mut ancestry = vec![<#parent as ::plainify_core_rs::ConvertibleClass>::class()];
      ancestry.extend(<#parent as ::plainify_core_rs::ConvertibleClass>::ancestry());
      ancestry
    },
    None => quote! { ::std::vec::Vec::new() },
  };

  let methods = &args.methods;
  let method_names = methods.iter().map(|method| method.to_string()).collect::<Vec<_>>();

  let (inherited_accessors, fallback) = match (&args.delegate, &args.extends) {
    (Some(delegate), Some(parent)) => (
      quote! {
        for inherited in <#parent as ::plainify_core_rs::ConvertibleClass>::accessors() {
          if !accessors.contains(&inherited) {
            accessors.push(inherited);
          }
        }
      },
      quote! { ::plainify_core_rs::Convertible::call_accessor(&self.#delegate, method) },
    ),
    _ => (quote! {}, quote! { None }),
  };

  let expanded = quote! {
    impl #impl_generics ::plainify_core_rs::ConvertibleClass for #name #ty_generics #where_clause {
      fn class() -> ::plainify_core_rs::ClassId {
        ::plainify_core_rs::ClassId::from_static(#class)
      }

      fn ancestry() -> ::std::vec::Vec<::plainify_core_rs::ClassId> {
        #ancestry
      }

      fn accessors() -> ::std::vec::Vec<&'static str> {
        #[allow(unused_mut)]
        let mut accessors: ::std::vec::Vec<&'static str> = vec![#(#method_names),*];
        #inherited_accessors
        accessors
      }
    }

    impl #impl_generics ::plainify_core_rs::Convertible for #name #ty_generics #where_clause {
      fn class_id(&self) -> ::plainify_core_rs::ClassId {
        <Self as ::plainify_core_rs::ConvertibleClass>::class()
      }

      fn ancestors(&self) -> ::std::vec::Vec<::plainify_core_rs::ClassId> {
        <Self as ::plainify_core_rs::ConvertibleClass>::ancestry()
      }

      fn call_accessor(&self, method: &str) -> Option<::plainify_core_rs::AccessorResult> {
        match method {
          #(#method_names => Some(Self::#methods(self)),)*
          _ => #fallback,
        }
      }

      fn as_any(&self) -> &(dyn ::std::any::Any + Send + Sync + 'static) {
        self
      }
    }
  };

  TokenStream::from(expanded)
}

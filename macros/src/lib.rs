//! Procedural macros for wext hardware tests.
//!
//! This crate provides the `#[hardware_test]` attribute macro for tests that
//! need a real wireless interface. On hosts without one the tests skip
//! instead of failing, so they can live next to ordinary unit tests.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Expr, ExprLit, FnArg, ItemFn, Lit, Meta, ReturnType};

/// Mark a function as a hardware test.
///
/// The function takes the interface under test and either returns nothing
/// (panics indicate failure) or a `Result<(), E>` with `E: Debug` (`Err`
/// indicates failure). It becomes a `#[test]` that opens the interface and
/// passes it in, or prints a note and passes when no wireless interface is
/// available.
///
/// # Attributes
///
/// - `#[hardware_test]` - Use the first wireless interface
/// - `#[hardware_test(interface = "wlan1")]` - Use a specific interface
///
/// # Example
///
/// ```ignore
/// use wext::Wireless;
/// use wext_macros::hardware_test;
///
/// #[hardware_test]
/// fn reports_protocol(wifi: &mut Wireless) {
///     assert!(wifi.protocol_name().unwrap().starts_with("IEEE 802.11"));
/// }
///
/// #[hardware_test(interface = "wlan1")]
/// fn reads_mode(wifi: &mut Wireless) -> wext::Result<()> {
///     wifi.mode()?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn hardware_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input_fn = parse_macro_input!(item as ItemFn);

    let fn_name = &input_fn.sig.ident;
    let fn_name_str = fn_name.to_string();
    let fn_block = &input_fn.block;
    let fn_attrs = &input_fn.attrs;
    let fn_inputs = &input_fn.sig.inputs;
    let fn_output = &input_fn.sig.output;

    if fn_inputs.len() != 1 || !matches!(fn_inputs.first(), Some(FnArg::Typed(_))) {
        return syn::Error::new_spanned(
            &input_fn.sig,
            "hardware_test: expected exactly one argument, e.g. `fn t(wifi: &mut Wireless)`",
        )
        .to_compile_error()
        .into();
    }

    let wanted = match parse_interface(attr) {
        Ok(name) => wanted_tokens(name),
        Err(e) => return e.to_compile_error().into(),
    };

    // Check if function returns Result or ()
    let returns_result = matches!(fn_output, ReturnType::Type(_, _));
    let call = if returns_result {
        quote! {
            if let ::core::result::Result::Err(e) = body(&mut wifi) {
                panic!("{} failed: {:?}", #fn_name_str, e);
            }
        }
    } else {
        quote! { body(&mut wifi); }
    };

    let expanded = quote! {
        #[test]
        #(#fn_attrs)*
        fn #fn_name() {
            fn body(#fn_inputs) #fn_output #fn_block

            let wanted: ::core::option::Option<&str> = #wanted;
            let interfaces = match ::wext::list_wireless_interfaces() {
                ::core::result::Result::Ok(interfaces) => interfaces,
                ::core::result::Result::Err(e) => {
                    eprintln!("skipping {}: cannot list interfaces: {}", #fn_name_str, e);
                    return;
                }
            };
            let chosen = match wanted {
                ::core::option::Option::Some(w) => interfaces.into_iter().find(|n| n.as_str() == w),
                ::core::option::Option::None => interfaces.into_iter().next(),
            };
            let ::core::option::Option::Some(chosen) = chosen else {
                eprintln!("skipping {}: no wireless interface", #fn_name_str);
                return;
            };
            let mut wifi = match ::wext::Wireless::open(chosen.as_str()) {
                ::core::result::Result::Ok(wifi) => wifi,
                ::core::result::Result::Err(e) => {
                    eprintln!("skipping {}: cannot open {}: {}", #fn_name_str, chosen, e);
                    return;
                }
            };

            #call
        }
    };

    TokenStream::from(expanded)
}

fn wanted_tokens(name: Option<String>) -> TokenStream2 {
    match name {
        Some(name) => quote! { ::core::option::Option::Some(#name) },
        None => quote! { ::core::option::Option::None },
    }
}

fn parse_interface(attr: TokenStream) -> syn::Result<Option<String>> {
    if attr.is_empty() {
        return Ok(None);
    }

    let meta: Meta = syn::parse(attr)?;
    match meta {
        Meta::NameValue(nv) if nv.path.is_ident("interface") => match nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => Ok(Some(s.value())),
            other => Err(syn::Error::new_spanned(
                other,
                "hardware_test: interface expects a string literal, \
                 e.g., #[hardware_test(interface = \"wlan0\")]",
            )),
        },
        other => Err(syn::Error::new_spanned(
            other,
            "hardware_test: unknown attribute. Supported: interface = \"name\"",
        )),
    }
}

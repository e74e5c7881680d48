use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Instrument a service method with a tracing span.
///
/// The return value is recorded at `trace` level, so the return type must
/// implement `Debug`. Any arguments passed to the attribute are forwarded to
/// `#[tracing::instrument]`, e.g. `#[trace_instrument(skip(self))]`.
#[proc_macro_attribute]
pub fn trace_instrument(meta: TokenStream, input: TokenStream) -> TokenStream {
    let meta = proc_macro2::TokenStream::from(meta);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(input as ItemFn);

    let fn_name = sig.ident.to_string();

    quote! {
        #[::tracing::instrument(ret(level = "trace"), #meta)]
        #(#attrs)*
        #vis #sig {
            ::tracing::trace!(method = #fn_name, "call");
            #block
        }
    }
    .into()
}

//! Per-receiver `serve_http` dispatchers.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{ApiEmitter, ident};
use crate::backend::resolver::accepted_methods;
use crate::frontend::model::{EndpointSpec, ServiceSpec};

impl ApiEmitter<'_> {
    /// `impl <Receiver> { pub fn serve_http(..) }` routing on the exact request path.
    pub(super) fn emit_dispatcher(&self, service: &ServiceSpec) -> TokenStream {
        let receiver = ident(&service.receiver_type);
        let arms = service.endpoints.iter().map(|endpoint| self.emit_route_arm(endpoint));

        quote! {
            impl #receiver {
                pub fn serve_http(&self, r: &Request<Vec<u8>>) -> Response<Vec<u8>> {
                    match r.uri().path() {
                        #(#arms)*
                        _ => write_error_message("unknown method", StatusCode::NOT_FOUND),
                    }
                }
            }
        }
    }

    fn emit_route_arm(&self, endpoint: &EndpointSpec) -> TokenStream {
        let url = endpoint.url.as_str();
        let handler_name = ident(&endpoint.handler_name());
        let methods = accepted_methods(endpoint.method)
            .iter()
            .map(|method| format_ident!("{}", method));
        let auth = endpoint.requires_auth.then(|| {
            quote! { let handler = auth_middleware(handler); }
        });

        quote! {
            #url => {
                let handler = |r: &Request<Vec<u8>>| self.#handler_name(r);
                let handler = check_method_middleware(handler, vec![#(Method::#methods),*]);
                #auth
                handler(r)
            }
        }
    }
}

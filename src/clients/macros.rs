/// Generates a client method that sends one request variant and awaits its reply.
///
/// `skip(...)` lists parameters kept out of the tracing span.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        client_method!($client => fn $method($($param: $param_type),*) -> $return_type as $request::$variant, Error = $error_type, skip());
    };
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty, skip($($skipped:ident),*)) => {
        impl $client {
            #[tracing::instrument(skip(self $(, $skipped)*))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| <$error_type>::ActorCommunication("Service closed".to_string()))?;

                response
                    .await
                    .map_err(|_| <$error_type>::ActorCommunication("Service dropped".to_string()))?
            }
        }
    };
}

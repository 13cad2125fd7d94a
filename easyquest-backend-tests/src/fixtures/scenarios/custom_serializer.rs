#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use easyquest::{BoxError, Serializer, Structured};
    #[cfg(feature = "async")]
    use easyquest::r#async::{Body as AsyncBody, Request as AsyncRequest};
    #[cfg(feature = "blocking")]
    use easyquest::blocking::{Body as BlockingBody, Request as BlockingRequest};
    use serde_json::Value;

    use crate::*;

    const PREFIX: &str = "ENVELOPE:";

    /// JSON behind a fixed prefix, so the wire format shows which serializer ran.
    #[derive(Debug)]
    struct EnvelopeSerializer;

    impl Serializer for EnvelopeSerializer {
        fn serialize(&self, value: &Value) -> Result<String, BoxError> {
            Ok(format!("{PREFIX}{}", serde_json::to_string(value)?))
        }

        fn deserialize(&self, data: &str) -> Result<Value, BoxError> {
            let json = data.strip_prefix(PREFIX).ok_or("missing envelope prefix")?;
            Ok(serde_json::from_str(json)?)
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    async fn mirror(req: Request<body::Incoming>) -> FixtureAssertionResult {
        let body = req.into_body().collect().await.unwrap().to_bytes();
        (Response::new(Full::new(body)).into(), Ok(()))
    }

    #[test]
    fn test_structured_bodies_use_client_serializer() {
        const PATH: &str = "scenarios/custom_serializer";
        let _handle = crate::add_hyper_fixture(PATH, mirror);
        let point = || Point { x: 3, y: -4 };

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .serializer(Arc::new(EnvelopeSerializer))
                .build_blocking()
                .unwrap();
            let structured = BlockingRequest::builder(crate::endpoint(PATH))
                .post()
                .body(BlockingBody::structured(point()))
                .build()
                .unwrap();
            let wire = client.send_text(&structured).unwrap().into_body();
            assert_eq!(wire, r#"ENVELOPE:{"x":3,"y":-4}"#);
            let decoded = client.send::<Structured<Point>>(&structured).unwrap();
            assert_eq!(decoded.into_body().into_inner(), Some(point()));

            // Text bypasses the serializer in both directions
            let text = BlockingRequest::builder(crate::endpoint(PATH))
                .post()
                .body(BlockingBody::text("plain"))
                .build()
                .unwrap();
            assert_eq!(client.send_text(&text).unwrap().into_body(), "plain");
        }

        #[cfg(feature = "async")]
        {
            let (wire, decoded, plain) = TOKIO_RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .serializer(Arc::new(EnvelopeSerializer))
                    .build_async()
                    .await
                    .unwrap();
                let structured = AsyncRequest::builder(crate::endpoint(PATH))
                    .post()
                    .body(AsyncBody::structured(point()))
                    .build()
                    .unwrap();
                let text = AsyncRequest::builder(crate::endpoint(PATH))
                    .post()
                    .body(AsyncBody::text("plain"))
                    .build()
                    .unwrap();
                (
                    client.send_text(&structured).await.unwrap().into_body(),
                    client
                        .send::<Structured<Point>>(&structured)
                        .await
                        .unwrap()
                        .into_body(),
                    client.send_text(&text).await.unwrap().into_body(),
                )
            });
            assert_eq!(wire, r#"ENVELOPE:{"x":3,"y":-4}"#);
            assert_eq!(decoded.into_inner(), Some(point()));
            assert_eq!(plain, "plain");
        }
    }
}

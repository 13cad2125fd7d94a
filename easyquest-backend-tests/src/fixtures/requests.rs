#[cfg(test)]
mod tests {
    use std::io::Write;

    #[cfg(feature = "async")]
    use easyquest::r#async::{Body as AsyncBody, Request as AsyncRequest};
    #[cfg(feature = "blocking")]
    use easyquest::blocking::{Body as BlockingBody, Request as BlockingRequest};
    use easyquest::Structured;

    use crate::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        tags: Vec<String>,
    }

    fn profile() -> Profile {
        Profile {
            name: "Ada".into(),
            tags: vec!["math".into(), "engines".into()],
        }
    }

    #[test]
    fn test_path_query_and_headers() {
        const PATH: &str = "requests/users/john%20doe";
        let _handle = crate::add_hyper_fixture(PATH, echo);

        let assertions = |echo: Echo| {
            assert_eq!(echo.method, "GET");
            assert_eq!(echo.path, "/requests/users/john%20doe");
            assert_eq!(echo.query.as_deref(), Some("active=true&name=a%2Bb"));
            assert_eq!(echo.headers["x-trace"], "t1");
            assert_eq!(echo.headers["accept"], "application/json");
            // GET never carries a body, even when one is declared
            assert_eq!(echo.body, "");
        };

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .build_blocking()
                .unwrap();
            let req = BlockingRequest::builder(crate::endpoint("requests/users/{id}"))
                .path_param("id", "john doe")
                .query_param("active", "true")
                .query_param("name", "a+b")
                .header("x-trace", "t1")
                .accept("application/json")
                .body(BlockingBody::text("ignored"))
                .get()
                .build()
                .unwrap();
            let res = client.send::<Structured<Echo>>(&req).unwrap();
            assert_eq!(res.status(), 200);
            assertions(res.into_body().into_inner().unwrap());
        }

        #[cfg(feature = "async")]
        {
            let echo = TOKIO_RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .build_async()
                    .await
                    .unwrap();
                let req = AsyncRequest::builder(crate::endpoint("requests/users/{id}"))
                    .path_param("id", "john doe")
                    .query_map([("active", "true"), ("name", "a+b")])
                    .header_map([("x-trace", "t1"), ("accept", "application/json")])
                    .body(AsyncBody::text("ignored"))
                    .get()
                    .build()
                    .unwrap();
                client.send::<Structured<Echo>>(&req).await.unwrap()
            });
            assertions(echo.into_body().into_inner().unwrap());
        }
    }

    #[test]
    fn test_structured_body() {
        const PATH: &str = "requests/structured";
        let _handle = crate::add_hyper_fixture(PATH, echo);

        let assertions = |echo: Echo| {
            assert_eq!(echo.method, "PATCH");
            assert_eq!(echo.headers["content-type"], "application/json");
            let sent: Profile = serde_json::from_str(&echo.body).unwrap();
            assert_eq!(sent, profile());
        };

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .build_blocking()
                .unwrap();
            let req = BlockingRequest::builder(crate::endpoint(PATH))
                .patch()
                .content_type("application/json")
                .body(BlockingBody::structured(profile()))
                .build()
                .unwrap();
            let res = client.send::<Structured<Echo>>(&req).unwrap();
            assertions(res.into_body().into_inner().unwrap());
        }

        #[cfg(feature = "async")]
        {
            let echo = TOKIO_RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .build_async()
                    .await
                    .unwrap();
                let req = AsyncRequest::builder(crate::endpoint(PATH))
                    .patch()
                    .content_type("application/json")
                    .body(AsyncBody::structured(profile()))
                    .build()
                    .unwrap();
                client.send::<Structured<Echo>>(&req).await.unwrap()
            });
            assertions(echo.into_body().into_inner().unwrap());
        }
    }

    #[test]
    fn test_text_and_bytes_bodies() {
        const PATH: &str = "requests/text_and_bytes";
        let _handle = crate::add_hyper_fixture(PATH, echo);

        const TEXT: &str = "héllo wörld";
        const BYTES: &[u8] = b"raw\0bytes";

        let assertions = |text: Echo, bytes: Echo| {
            assert_eq!(text.method, "POST");
            assert_eq!(text.body, TEXT);
            assert_eq!(text.headers["content-length"], TEXT.len().to_string());
            assert_eq!(bytes.method, "PUT");
            assert_eq!(bytes.body.as_bytes(), BYTES);
        };

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .build_blocking()
                .unwrap();
            let text = BlockingRequest::builder(crate::endpoint(PATH))
                .post()
                .body(BlockingBody::text(TEXT))
                .build()
                .unwrap();
            let bytes = BlockingRequest::builder(crate::endpoint(PATH))
                .put()
                .body(BlockingBody::bytes(BYTES))
                .build()
                .unwrap();
            let text = client.send::<Structured<Echo>>(&text).unwrap();
            let bytes = client.send::<Structured<Echo>>(&bytes).unwrap();
            assertions(
                text.into_body().into_inner().unwrap(),
                bytes.into_body().into_inner().unwrap(),
            );
        }

        #[cfg(feature = "async")]
        {
            let (text, bytes) = TOKIO_RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .build_async()
                    .await
                    .unwrap();
                let text = AsyncRequest::builder(crate::endpoint(PATH))
                    .post()
                    .body(AsyncBody::text(TEXT))
                    .build()
                    .unwrap();
                let bytes = AsyncRequest::builder(crate::endpoint(PATH))
                    .put()
                    .body(AsyncBody::bytes(BYTES))
                    .build()
                    .unwrap();
                (
                    client.send::<Structured<Echo>>(&text).await.unwrap(),
                    client.send::<Structured<Echo>>(&bytes).await.unwrap(),
                )
            });
            assertions(
                text.into_body().into_inner().unwrap(),
                bytes.into_body().into_inner().unwrap(),
            );
        }
    }

    #[test]
    fn test_delete_and_head_skip_body() {
        const PATH: &str = "requests/delete_and_head";
        let _handle = crate::add_hyper_fixture(PATH, echo);

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .build_blocking()
                .unwrap();
            let delete = BlockingRequest::builder(crate::endpoint(PATH))
                .delete()
                .body(BlockingBody::text("ignored"))
                .build()
                .unwrap();
            let echo = client
                .send::<Structured<Echo>>(&delete)
                .unwrap()
                .into_body()
                .into_inner()
                .unwrap();
            assert_eq!(echo.method, "DELETE");
            assert_eq!(echo.body, "");

            let head = delete.to_builder().head().build().unwrap();
            let res = client.send::<()>(&head).unwrap();
            assert_eq!(res.status(), 200);
        }

        #[cfg(feature = "async")]
        {
            TOKIO_RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .build_async()
                    .await
                    .unwrap();
                let delete = AsyncRequest::builder(crate::endpoint(PATH))
                    .delete()
                    .body(AsyncBody::text("ignored"))
                    .build()
                    .unwrap();
                let echo = client
                    .send::<Structured<Echo>>(&delete)
                    .await
                    .unwrap()
                    .into_body()
                    .into_inner()
                    .unwrap();
                assert_eq!(echo.method, "DELETE");
                assert_eq!(echo.body, "");

                let head = delete.to_builder().head().build().unwrap();
                let res = client.send::<()>(&head).await.unwrap();
                assert_eq!(res.status(), 200);
            });
        }
    }

    #[test]
    fn test_file_body() {
        const PATH: &str = "requests/file_body";
        const CONTENT: &str = "line one\nline two\n";
        let _handle = crate::add_hyper_fixture(PATH, echo);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONTENT.as_bytes()).unwrap();
        let path = file.path().to_owned();

        let assertions = |echo: Echo| {
            assert_eq!(echo.body, CONTENT);
            assert_eq!(echo.headers["content-length"], CONTENT.len().to_string());
        };

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .build_blocking()
                .unwrap();
            let req = BlockingRequest::builder(crate::endpoint(PATH))
                .post()
                .body(BlockingBody::file(&path))
                .build()
                .unwrap();
            let res = client.send::<Structured<Echo>>(&req).unwrap();
            assertions(res.into_body().into_inner().unwrap());
        }

        #[cfg(feature = "async")]
        {
            let res = TOKIO_RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .build_async()
                    .await
                    .unwrap();
                let req = AsyncRequest::builder(crate::endpoint(PATH))
                    .post()
                    .body(AsyncBody::file(&path))
                    .build()
                    .unwrap();
                client.send::<Structured<Echo>>(&req).await.unwrap()
            });
            assertions(res.into_body().into_inner().unwrap());
        }
    }

    #[test]
    fn test_stream_body_reopened_per_send() {
        const PATH: &str = "requests/stream_body";
        let _handle = crate::add_hyper_fixture(PATH, echo);

        // Spans several read buffers
        let content: String = (0..100_000u32)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .build_blocking()
                .unwrap();
            let source = content.clone();
            let req = BlockingRequest::builder(crate::endpoint(PATH))
                .put()
                .body(BlockingBody::stream(move || {
                    Ok(std::io::Cursor::new(source.clone().into_bytes()))
                }))
                .build()
                .unwrap();
            for _ in 0..2 {
                let echo = client
                    .send::<Structured<Echo>>(&req)
                    .unwrap()
                    .into_body()
                    .into_inner()
                    .unwrap();
                assert_eq!(echo.body, content);
            }
        }

        #[cfg(feature = "async")]
        {
            let source = content.clone();
            let bodies = TOKIO_RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .build_async()
                    .await
                    .unwrap();
                let req = AsyncRequest::builder(crate::endpoint(PATH))
                    .put()
                    .body(AsyncBody::stream(move || {
                        Ok(futures::io::Cursor::new(source.clone().into_bytes()))
                    }))
                    .build()
                    .unwrap();
                let mut bodies = vec![];
                for _ in 0..2 {
                    let res = client.send::<Structured<Echo>>(&req).await.unwrap();
                    bodies.push(res.into_body().into_inner().unwrap().body);
                }
                bodies
            });
            assert_eq!(bodies, [content.clone(), content]);
        }
    }

    #[test]
    fn test_fragment_stays_local() {
        const PATH: &str = "requests/fragment";
        let _handle = crate::add_hyper_fixture(PATH, echo);

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .build_blocking()
                .unwrap();
            let req = BlockingRequest::builder(crate::endpoint(PATH))
                .query_param("q", "1")
                .fragment("section 2")
                .get()
                .build()
                .unwrap();
            assert!(req.resolve_url().unwrap().as_str().ends_with("?q=1#section%202"));
            let echo = client
                .send::<Structured<Echo>>(&req)
                .unwrap()
                .into_body()
                .into_inner()
                .unwrap();
            assert_eq!(echo.query.as_deref(), Some("q=1"));
        }

        #[cfg(feature = "async")]
        {
            let echo = TOKIO_RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .build_async()
                    .await
                    .unwrap();
                let req = AsyncRequest::builder(crate::endpoint(PATH))
                    .query_param("q", "1")
                    .fragment("section 2")
                    .get()
                    .build()
                    .unwrap();
                client.send::<Structured<Echo>>(&req).await.unwrap()
            });
            let echo = echo.into_body().into_inner().unwrap();
            assert_eq!(echo.query.as_deref(), Some("q=1"));
        }
    }

    #[test]
    fn test_convenience_headers() {
        const PATH: &str = "requests/convenience_headers";
        let _handle = crate::add_hyper_fixture(PATH, echo);

        let assertions = |echo: Echo| {
            assert_eq!(echo.headers["user-agent"], "fixture-agent/1.0");
            assert_eq!(echo.headers["accept-language"], "en-GB");
            assert_eq!(echo.headers["accept-encoding"], "identity");
            assert_eq!(echo.headers["authorization"], "Bearer token");
            assert_eq!(echo.headers["cookie"], "session=abc");
            assert_eq!(echo.headers["referer"], "https://example.com/from");
            assert_eq!(echo.headers["origin"], "https://example.com");
        };

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .build_blocking()
                .unwrap();
            let req = BlockingRequest::builder(crate::endpoint(PATH))
                .get()
                .user_agent("fixture-agent/1.0")
                .accept_language("en-GB")
                .accept_encoding("identity")
                .authorization("Bearer token")
                .cookie("session=abc")
                .referer("https://example.com/from")
                .origin("https://example.com")
                .build()
                .unwrap();
            let res = client.send::<Structured<Echo>>(&req).unwrap();
            assertions(res.into_body().into_inner().unwrap());
        }

        #[cfg(feature = "async")]
        {
            let res = TOKIO_RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .build_async()
                    .await
                    .unwrap();
                let req = AsyncRequest::builder(crate::endpoint(PATH))
                    .get()
                    .user_agent("fixture-agent/1.0")
                    .accept_language("en-GB")
                    .accept_encoding("identity")
                    .authorization("Bearer token")
                    .cookie("session=abc")
                    .referer("https://example.com/from")
                    .origin("https://example.com")
                    .build()
                    .unwrap();
                client.send::<Structured<Echo>>(&req).await.unwrap()
            });
            assertions(res.into_body().into_inner().unwrap());
        }
    }
}

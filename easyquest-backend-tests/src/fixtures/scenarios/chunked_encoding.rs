#[cfg(test)]
mod tests {
    #[cfg(feature = "async")]
    use easyquest::r#async::Request as AsyncRequest;
    #[cfg(feature = "blocking")]
    use easyquest::blocking::Request as BlockingRequest;
    use futures::stream;
    use hyper::Method;

    use crate::*;

    const CHUNKS: [&str; 5] = ["Hello", ", ", "", "chunked ", "world!"];

    #[test]
    fn test_chunked_encoding() {
        const PATH: &str = "scenarios/chunked_encoding";

        let _handle = crate::add_hyper_fixture(PATH, |req| async move {
            let stream = stream::iter(CHUNKS.iter().map(|chunk| {
                let chunk = Bytes::copy_from_slice(chunk.as_bytes());
                Ok::<_, hyper::Error>(hyper::body::Frame::data(chunk))
            }));
            let body = http_body_util::StreamBody::new(stream).boxed();
            let res = Response::new(body);

            (res, (req.method() == Method::GET).then_some(()).ok_or(req))
        });

        let expected_content = CHUNKS.concat();
        let dir = tempfile::tempdir().unwrap();

        let assertions = |text: &str, saved: std::path::PathBuf| {
            assert_eq!(text, expected_content);
            assert_eq!(std::fs::read_to_string(saved).unwrap(), expected_content);
        };

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .build_blocking()
                .unwrap();
            let req = BlockingRequest::builder(crate::endpoint(PATH))
                .get()
                .build()
                .unwrap();
            let text = client.send_text(&req).unwrap().into_body();
            let saved = client
                .send_to_file(&req, dir.path().join("blocking.txt"))
                .unwrap()
                .into_body();
            assertions(&text, saved);
        }

        #[cfg(feature = "async")]
        {
            let (text, saved) = TOKIO_RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .build_async()
                    .await
                    .unwrap();
                let req = AsyncRequest::builder(crate::endpoint(PATH))
                    .get()
                    .build()
                    .unwrap();
                (
                    client.send_text(&req).await.unwrap().into_body(),
                    client
                        .send_to_file(&req, dir.path().join("async.txt"))
                        .await
                        .unwrap()
                        .into_body(),
                )
            });
            assertions(&text, saved);
        }
    }
}

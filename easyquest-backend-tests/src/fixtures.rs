mod requests;

mod client_options {
    mod basic_auth;
    mod headers;
    mod redirects;
    mod request_timeout;
    mod response_size;
    mod user_agent;
}

mod errors {
    mod invalid_structured;
    mod request_errors;
    mod unsuccessful_status;
}

mod scenarios {
    mod blocking_in_runtime;
    mod chunked_encoding;
    mod custom_serializer;
}

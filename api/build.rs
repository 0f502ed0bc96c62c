// Generates the `verification.Auth` service stubs over the hand-written
// prost messages in `src/proto.rs`, so no protoc is needed to build.

fn main() {
    let validate_token = tonic_build::manual::Method::builder()
        .name("validate_token")
        .route_name("ValidateToken")
        .input_type("crate::proto::TokenValidatorRequest")
        .output_type("crate::proto::TokenValidatorResponse")
        .codec_path("tonic::codec::ProstCodec")
        .build();

    let auth = tonic_build::manual::Service::builder()
        .name("Auth")
        .package("verification")
        .method(validate_token)
        .build();

    tonic_build::manual::Builder::new().compile(&[auth]);

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=proto/verification.proto");
}

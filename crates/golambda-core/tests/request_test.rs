use std::path::Path;

use golambda_core::{BuildRequest, Error, GolambdaConfig};

#[test]
fn resolves_relative_paths_against_working_dir() {
    let request = BuildRequest::new(
        "/work",
        "hello.go",
        "dist/hello.zip",
        GolambdaConfig::default(),
    )
    .unwrap();

    assert_eq!(request.working_dir(), Path::new("/work"));
    assert_eq!(request.source(), Path::new("/work/hello.go"));
    assert_eq!(request.output(), Path::new("/work/dist/hello.zip"));
}

#[test]
fn keeps_absolute_paths() {
    let request = BuildRequest::new(
        "/work",
        "/src/fn/hello.go",
        "/out/hello.zip",
        GolambdaConfig::default(),
    )
    .unwrap();

    assert_eq!(request.source(), Path::new("/src/fn/hello.go"));
    assert_eq!(request.output(), Path::new("/out/hello.zip"));
}

#[test]
fn empty_source_is_rejected() {
    let result = BuildRequest::new("/work", "", "out.zip", GolambdaConfig::default());
    assert!(matches!(result, Err(Error::MissingSource)));
}

#[test]
fn empty_output_is_rejected() {
    let result = BuildRequest::new("/work", "hello.go", "", GolambdaConfig::default());
    assert!(matches!(result, Err(Error::MissingOutput)));
}

#[test]
fn missing_source_error_mentions_usage() {
    let err = BuildRequest::new("/work", "", "", GolambdaConfig::default()).unwrap_err();
    assert!(err.to_string().contains("--source"));
}

#[test]
fn binary_path_uses_configured_name() {
    let mut config = GolambdaConfig::default();
    config.target.binary_name = "bootstrap".to_owned();

    let request = BuildRequest::new("/work", "hello.go", "out.zip", config).unwrap();
    assert_eq!(request.binary_path(), Path::new("/work/bootstrap"));
}

#[test]
fn manifest_paths_follow_configured_order() {
    let request =
        BuildRequest::new("/work", "hello.go", "out.zip", GolambdaConfig::default()).unwrap();

    assert_eq!(
        request.manifest_paths(),
        vec![Path::new("/work/go.mod"), Path::new("/work/go.sum")]
    );
}

#[test]
fn output_colliding_with_binary_is_rejected() {
    let result = BuildRequest::new("/work", "hello.go", "main", GolambdaConfig::default());
    assert!(matches!(
        result,
        Err(Error::OutputIsBinary { path }) if path == Path::new("/work/main")
    ));
}

#[test]
fn output_collision_follows_configured_binary_name() {
    let mut config = GolambdaConfig::default();
    config.target.binary_name = "bootstrap".to_owned();

    let result = BuildRequest::new("/work", "hello.go", "./bootstrap", config.clone());
    assert!(matches!(result, Err(Error::OutputIsBinary { .. })));

    // `main` is an ordinary output name once the binary is called something else.
    let request = BuildRequest::new("/work", "hello.go", "main", config).unwrap();
    assert_eq!(request.output(), Path::new("/work/main"));
}

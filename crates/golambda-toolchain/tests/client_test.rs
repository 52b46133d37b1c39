use golambda_core::{BuildRequest, FunctionSource, GolambdaConfig};
use golambda_toolchain::client::{GoToolchain, ToolchainStep};
use golambda_toolchain::error::ToolchainError;
use golambda_toolchain::executor::{CommandOutput, Invocation, ToolchainExecutor};
use mockall::mock;
use std::path::{Path, PathBuf};

mock! {
    Executor {}

    impl ToolchainExecutor for Executor {
        fn locate(&self, program: &str) -> Result<PathBuf, ToolchainError>;
        async fn exec(&self, invocation: &Invocation) -> Result<CommandOutput, ToolchainError>;
    }
}

fn request() -> BuildRequest {
    BuildRequest::new("/work", "hello.go", "hello.zip", GolambdaConfig::default()).unwrap()
}

fn source() -> FunctionSource {
    FunctionSource::from_path(Path::new("/work/hello.go")).unwrap()
}

fn failed(stderr: &str) -> ToolchainError {
    ToolchainError::CommandFailed {
        args: vec![],
        code: Some(1),
        stderr: stderr.to_owned(),
    }
}

// ── Plan Tests ──

#[test]
fn plan_without_module_manifest_runs_init_tidy_build() {
    let steps = ToolchainStep::plan(&request(), &source(), false).unwrap();

    assert_eq!(
        steps,
        vec![
            ToolchainStep::ModInit {
                module: "github.com/nhost.io/hello".to_owned(),
            },
            ToolchainStep::ModTidy,
            ToolchainStep::Build {
                output: "/work/main".to_owned(),
                os: "linux".to_owned(),
                arch: "amd64".to_owned(),
            },
        ]
    );
}

#[test]
fn plan_with_module_manifest_skips_init() {
    let steps = ToolchainStep::plan(&request(), &source(), true).unwrap();

    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0], ToolchainStep::ModTidy);
    assert!(matches!(steps[1], ToolchainStep::Build { .. }));
}

#[test]
fn plan_uses_configured_target() {
    let mut config = GolambdaConfig::default();
    config.target.arch = "arm64".to_owned();
    config.target.binary_name = "bootstrap".to_owned();
    config.toolchain.module_prefix = "example.com/fns".to_owned();
    let request = BuildRequest::new("/work", "hello.go", "hello.zip", config).unwrap();

    let steps = ToolchainStep::plan(&request, &source(), false).unwrap();

    assert_eq!(steps[0].args(), vec!["mod", "init", "example.com/fns/hello"]);
    assert_eq!(steps[2].args(), vec!["build", "-o", "/work/bootstrap"]);
    assert_eq!(
        steps[2].env(),
        vec![
            ("GOOS".to_owned(), "linux".to_owned()),
            ("GOARCH".to_owned(), "arm64".to_owned()),
        ]
    );
}

#[test]
fn only_build_step_overrides_environment() {
    let steps = ToolchainStep::plan(&request(), &source(), false).unwrap();

    assert!(steps[0].env().is_empty());
    assert!(steps[1].env().is_empty());
    assert_eq!(steps[2].env().len(), 2);
}

#[test]
fn step_labels() {
    let steps = ToolchainStep::plan(&request(), &source(), false).unwrap();
    let labels: Vec<_> = steps.iter().map(ToolchainStep::label).collect();

    assert_eq!(labels, vec!["go mod init", "go mod tidy", "go build"]);
}

#[test]
fn invocation_binds_program_and_directory() {
    let invocation =
        ToolchainStep::ModTidy.invocation(Path::new("/usr/bin/go"), Path::new("/tmp/stage"));

    assert_eq!(invocation.program, PathBuf::from("/usr/bin/go"));
    assert_eq!(invocation.dir, PathBuf::from("/tmp/stage"));
    assert_eq!(invocation.args, vec!["mod", "tidy"]);
    assert!(invocation.env.is_empty());
}

// ── Locate Tests ──

#[test]
fn locate_returns_resolved_path() {
    let mut mock = MockExecutor::new();
    mock.expect_locate()
        .withf(|program| program == "go")
        .returning(|_| Ok(PathBuf::from("/usr/local/go/bin/go")));

    let toolchain = GoToolchain::with_executor(mock);
    assert_eq!(
        toolchain.locate("go").unwrap(),
        PathBuf::from("/usr/local/go/bin/go")
    );
}

#[test]
fn locate_not_found() {
    let mut mock = MockExecutor::new();
    mock.expect_locate().returning(|program| {
        Err(ToolchainError::NotFound {
            program: program.to_owned(),
            source: which::Error::CannotFindBinaryPath,
        })
    });

    let toolchain = GoToolchain::with_executor(mock);
    let err = toolchain.locate("go").unwrap_err();

    assert!(matches!(err, ToolchainError::NotFound { .. }));
    assert!(err.to_string().contains("not found on PATH"));
}

// ── Run Tests ──

#[tokio::test]
async fn run_executes_in_staging_dir() {
    let mut mock = MockExecutor::new();
    mock.expect_exec()
        .withf(|inv| {
            inv.dir == Path::new("/tmp/stage")
                && inv.program == Path::new("/usr/bin/go")
                && inv.args == vec!["mod".to_owned(), "tidy".to_owned()]
        })
        .times(1)
        .returning(|_| Ok(CommandOutput::default()));

    let toolchain = GoToolchain::with_executor(mock);
    toolchain
        .run(
            Path::new("/usr/bin/go"),
            &ToolchainStep::ModTidy,
            Path::new("/tmp/stage"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn run_failure_is_labelled_with_step() {
    let mut mock = MockExecutor::new();
    mock.expect_exec()
        .returning(|_| Err(failed("cannot find module providing package foo")));

    let toolchain = GoToolchain::with_executor(mock);
    let err = toolchain
        .run(
            Path::new("/usr/bin/go"),
            &ToolchainStep::ModTidy,
            Path::new("/tmp/stage"),
        )
        .await
        .unwrap_err();

    assert_eq!(err.label, "go mod tidy");
    assert_eq!(err.to_string(), "go mod tidy failed");
    assert!(err.source.to_string().contains("cannot find module"));
}

#[tokio::test]
async fn run_all_runs_steps_in_order() {
    let mut mock = MockExecutor::new();
    let mut seq = mockall::Sequence::new();

    mock.expect_exec()
        .withf(|inv| inv.args.first().map(String::as_str) == Some("mod") && inv.args[1] == "init")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(CommandOutput::default()));
    mock.expect_exec()
        .withf(|inv| inv.args == vec!["mod".to_owned(), "tidy".to_owned()])
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(CommandOutput::default()));
    mock.expect_exec()
        .withf(|inv| inv.args.first().map(String::as_str) == Some("build"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(CommandOutput::default()));

    let steps = ToolchainStep::plan(&request(), &source(), false).unwrap();
    let toolchain = GoToolchain::with_executor(mock);
    toolchain
        .run_all(Path::new("/usr/bin/go"), &steps, Path::new("/tmp/stage"))
        .await
        .unwrap();
}

#[tokio::test]
async fn run_all_stops_at_first_failure() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|inv| inv.args == vec!["mod".to_owned(), "tidy".to_owned()])
        .times(1)
        .returning(|_| Err(failed("network unreachable")));
    mock.expect_exec()
        .withf(|inv| inv.args.first().map(String::as_str) == Some("build"))
        .never();

    let steps = ToolchainStep::plan(&request(), &source(), true).unwrap();
    let toolchain = GoToolchain::with_executor(mock);
    let err = toolchain
        .run_all(Path::new("/usr/bin/go"), &steps, Path::new("/tmp/stage"))
        .await
        .unwrap_err();

    assert_eq!(err.label, "go mod tidy");
}

#[test]
fn command_failed_reports_exit_code() {
    let err = ToolchainError::CommandFailed {
        args: vec!["build".to_owned()],
        code: Some(2),
        stderr: "./hello.go:3:1: syntax error".to_owned(),
    };
    let message = err.to_string();

    assert!(message.contains("exit code 2"));
    assert!(message.contains("syntax error"));
}

#[test]
fn command_failed_by_signal() {
    let err = ToolchainError::CommandFailed {
        args: vec![],
        code: None,
        stderr: String::new(),
    };
    assert!(err.to_string().contains("terminated by signal"));
}

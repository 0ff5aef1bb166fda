use steiner_viewer::AppError;

fn main() -> Result<(), AppError> {
    // Set up logging; RUST_LOG controls verbosity
    env_logger::init();

    // Solve requests and export dialogs run on this runtime
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    steiner_viewer::run_app(runtime.handle().clone())
}

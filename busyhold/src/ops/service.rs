/// Holds a status-query handle to the named service until the operator presses
/// Enter. The service handle is released before the SCM connection, the reverse
/// of acquisition order, and both are released on every exit path.
#[cfg(windows)]
pub fn open_service_and_wait(service_name: &str) -> anyhow::Result<()> {
  use windows_service::service::ServiceAccess;
  use windows_service::service_manager::{ServiceManager, ServiceManagerAccess};

  let manager = ServiceManager::local_computer(None::<&str>, ServiceManagerAccess::CONNECT)
    .map_err(|e| {
      anyhow::anyhow!(
        "Failed to open Service Control Manager. Error: {}",
        describe_service_error(&e)
      )
    })?;

  println!("Attempting to open service: {service_name}");
  let service = manager
    .open_service(service_name, ServiceAccess::QUERY_STATUS)
    .map_err(|e| anyhow::anyhow!("Failed to open service. Error: {}", describe_service_error(&e)))?;

  tracing::info!(service = %service_name, "service handle opened");
  println!("Successfully opened service: {service_name}");
  println!("Press Enter to close the service handle and exit.");
  crate::gate::wait_for_enter();

  println!("Closing service handle.");
  drop(service);
  drop(manager);
  Ok(())
}

#[cfg(windows)]
fn describe_service_error(err: &windows_service::Error) -> String {
  match err {
    windows_service::Error::Winapi(io) => crate::oserr::describe_io(io),
    other => other.to_string(),
  }
}

#[cfg(not(windows))]
pub fn open_service_and_wait(_service_name: &str) -> anyhow::Result<()> {
  Err(anyhow::anyhow!("service holds are only supported on Windows"))
}

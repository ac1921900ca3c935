use log::{debug, info};
use tokio::process::Command;
use crate::config::Credentials;
use crate::error::Error;

const AZ: &str = "az";

/// Login to Azure with the service principal and activate its subscription for the
/// subsequent azure cli commands
pub async fn login(credentials: &Credentials) -> Result<(), Error> {
    info!("Logging in to Azure");
    run_os_command(&[
        "login",
        "--service-principal",
        "-u",
        credentials.client_id.as_str(),
        "-p",
        credentials.client_secret.as_str(),
        "--tenant",
        credentials.tenant_id.as_str(),
    ]).await?;

    info!("Setting Azure subscription {} as active", credentials.subscription_id);
    run_os_command(&["account", "set", "--subscription", credentials.subscription_id.as_str()]).await?;
    Ok(())
}

/// Current quota usage of the registry in bytes
pub async fn get_registry_usage(registry_name: &str, resource_group: &str) -> Result<u64, Error> {
    let output = run_os_command(&[
        "acr",
        "show-usage",
        "--name",
        registry_name,
        "--resource-group",
        resource_group,
        "--output",
        "json",
        "--query",
        "value[0].currentValue",
    ]).await?;
    let usage = parse_usage(&output)?;
    info!("The current quota usage on {registry_name} is {usage} bytes");
    Ok(usage)
}

fn parse_usage(output: &str) -> Result<u64, Error> {
    output.trim().parse::<u64>().map_err(|_| Error::InvalidQuota(output.trim().to_string()))
}

/// Run an azure cli command and return its trimmed stdout. A non-zero exit status is an error
async fn run_os_command(args: &[&str]) -> Result<String, Error> {
    // the secret of `az login` must not end up in the logs
    let command = format!("{AZ} {}", args.first().copied().unwrap_or_default());
    debug!("Running '{command}'");

    let output = Command::new(AZ)
        .args(args)
        .output()
        .await
        .map_err(|err| Error::CommandFailed { command: command.clone(), reason: err.to_string() })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::CommandFailed { command, reason: format!("{}: {}", output.status, stderr.trim()) })
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod test {
    use crate::az::parse_usage;
    use crate::error::Error;

    #[test]
    fn test_parse_usage() {
        assert_eq!(parse_usage("1073741824\n").unwrap(), 1_073_741_824);
        assert_eq!(parse_usage("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_invalid_usage() {
        assert!(matches!(parse_usage(""), Err(Error::InvalidQuota(value)) if value.is_empty()));
        assert!(matches!(parse_usage("null"), Err(Error::InvalidQuota(value)) if value == "null"));
        assert!(matches!(parse_usage("-5"), Err(Error::InvalidQuota(_))));
    }
}

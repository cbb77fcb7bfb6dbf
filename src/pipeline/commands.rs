use crate::config::ContainerSpec;
use crate::docker::RunCommand;

/// Build the detached `run` invocation for a container spec.
///
/// Layout: `run -d [--network N] [--name C] (-v H:C)* (-p P)* (-e K=V)* IMAGE`.
/// Every value is its own argument, so nothing needs quoting.
pub fn run_command(spec: &ContainerSpec) -> RunCommand {
    let mut args: Vec<String> = vec!["run".into(), "-d".into()];

    if let Some(network) = &spec.network {
        args.extend(["--network".into(), network.clone()]);
    }
    if let Some(name) = &spec.name {
        args.extend(["--name".into(), name.clone()]);
    }

    for mapping in &spec.volume {
        args.extend(["-v".into(), mapping.to_flag_value()]);
    }
    for port in &spec.ports {
        args.extend(["-p".into(), port.clone()]);
    }
    for entry in &spec.environment {
        args.extend(["-e".into(), entry.to_flag_value()]);
    }

    args.push(spec.image.clone());
    RunCommand { args }
}

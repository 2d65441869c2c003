use maas_agent_helper::command::{CommandOS, CommandRunner};

fn args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

#[cfg(unix)]
#[test]
fn blocking_runner_reports_exit_status() {
    // provide invalid argument to sleep command
    assert!(!CommandOS.run(&args(&["sleep", "fdsa"])).unwrap().success());

    assert!(CommandOS.run(&args(&["sleep", "0.1"])).unwrap().success());

    let status = CommandOS.run(&args(&["sh", "-c", "exit 3"])).unwrap();
    assert_eq!(status.code(), Some(3));
}

#[cfg(unix)]
mod setup_rack {
    use maas_agent_helper::maas::MaasHelper;
    use tempfile::TempDir;

    use crate::common::{create_script, TestResult};

    #[test]
    fn init_tool_receives_arguments_verbatim() -> TestResult<()> {
        let dir = TempDir::new()?;
        let captured = dir.path().join("args");
        let tool = create_script(
            &dir,
            "maas",
            &format!(r#"printf '%s\n' "$@" > "{}""#, captured.display()),
        )?;

        let helper = MaasHelper::default().with_init_binary(tool.to_string_lossy());
        let url = "http://10.0.0.2:5240/MAAS";
        let secret = "secret with spaces";

        assert!(helper.setup_rack(url, secret));
        assert_eq!(
            std::fs::read_to_string(&captured)?,
            format!("init\nrack\n--maas-url\n{url}\n--secret\n{secret}\n--force\n")
        );
        Ok(())
    }

    #[test]
    fn init_tool_failure() -> TestResult<()> {
        let dir = TempDir::new()?;
        let tool = create_script(&dir, "maas", "exit 1")?;

        let helper = MaasHelper::default().with_init_binary(tool.to_string_lossy());

        assert!(!helper.setup_rack("http://10.0.0.2:5240/MAAS", "secret"));
        Ok(())
    }

    #[test]
    fn init_tool_missing() {
        let helper = MaasHelper::default().with_init_binary("/non/existent/maas");

        assert!(!helper.setup_rack("http://10.0.0.2:5240/MAAS", "secret"));
    }
}

// ems-client/examples/dashboard.rs
// 仪表盘示例 - 加载员工列表并按关键字过滤

use ems_client::{ClientConfig, EmployeeViewModel, GateDecision, RenderStyle, check_gate, render};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let term = args.get(1).cloned().unwrap_or_default();

    let mut config = ClientConfig::from_env()?;
    let store = config.open_session_store()?;

    if config.auth_mode.is_bearer() {
        match check_gate(&store) {
            GateDecision::Granted(session) => {
                tracing::info!("Logged in as: {} [{}]", session.username, session.avatar());
                if let Some(token) = session.token {
                    config = config.with_token(token);
                }
            }
            GateDecision::Redirect(page) => {
                println!("Not logged in, please go to the {page} page first");
                return Ok(());
            }
        }
    }

    let mut vm = EmployeeViewModel::new(config.build_http_client()?);
    if let Err(e) = vm.load().await {
        tracing::error!("Failed to load employees: {}", e);
    }
    vm.set_filter(term);

    print!("{}", render::render(&vm.view(), RenderStyle::Table));
    Ok(())
}

mod api;
mod auth;
mod config;
mod currency;
mod error;
mod ledger;
mod logging;
mod models;
mod reconcile;
mod resolve;
mod statement;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{error, info, warn};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::api::ApiClient;
use crate::auth::{Session, StaticCredentials};
use crate::config::Args;
use crate::error::ConsoleError;
use crate::reconcile::FullReplace;
use crate::statement::{ProjectStatement, StatementWriter};
use crate::ui::components::popup::{render_notice, Notice};
use crate::ui::{
    client_wizard::{ClientWizardAction, ClientWizardState, render_client_wizard, handle_input as handle_client_wizard_input},
    clients::{ClientAction, ClientsState, render_clients, handle_input as handle_clients_input},
    dashboard::{DashboardAction, DashboardState, render_dashboard, handle_input as handle_dashboard_input},
    login::{LoginAction, LoginState, render_login, handle_input as handle_login_input},
    payment_wizard::{PaymentWizardAction, PaymentWizardState, render_payment_wizard, handle_input as handle_payment_wizard_input},
    payments::{PaymentAction, PaymentsState, render_payments, handle_input as handle_payments_input},
    project_wizard::{ProjectWizardAction, ProjectWizardState, render_project_wizard, handle_input as handle_project_wizard_input},
    projects::{ProjectAction, ProjectsState, render_projects, handle_input as handle_projects_input},
    team_assignment::{TeamAssignmentAction, TeamAssignmentState, render_team_assignment, handle_input as handle_team_assignment_input},
    team_member_wizard::{TeamMemberWizardAction, TeamMemberWizardState, render_team_member_wizard, handle_input as handle_team_member_wizard_input},
    team_members::{TeamMemberAction, TeamMembersState, render_team_members, handle_input as handle_team_members_input},
};

// Represents the current screen in the app
enum AppScreen {
    Login,
    Dashboard,
    Clients,
    ClientWizard,
    TeamMembers,
    TeamMemberWizard,
    Projects,
    ProjectWizard,
    TeamAssignment,
    Payments,
    PaymentWizard,
}

// Main application state
struct AppState {
    api: ApiClient,
    auth: StaticCredentials,
    output_dir: PathBuf,
    session: Option<Session>,
    screen: AppScreen,
    notice: Option<Notice>,
    login_state: LoginState,
    dashboard_state: Option<DashboardState>,
    clients_state: Option<ClientsState>,
    client_wizard_state: Option<ClientWizardState>,
    team_members_state: Option<TeamMembersState>,
    team_member_wizard_state: Option<TeamMemberWizardState>,
    projects_state: Option<ProjectsState>,
    project_wizard_state: Option<ProjectWizardState>,
    team_assignment_state: Option<TeamAssignmentState>,
    payments_state: Option<PaymentsState>,
    payment_wizard_state: Option<PaymentWizardState>,
}

impl AppState {
    fn new(api: ApiClient, config: &config::Config) -> Self {
        Self {
            api,
            auth: StaticCredentials::from_config(config),
            output_dir: config.output_dir.clone(),
            session: None,
            screen: AppScreen::Login,
            notice: None,
            login_state: LoginState::new(),
            dashboard_state: None,
            clients_state: None,
            client_wizard_state: None,
            team_members_state: None,
            team_member_wizard_state: None,
            projects_state: None,
            project_wizard_state: None,
            team_assignment_state: None,
            payments_state: None,
            payment_wizard_state: None,
        }
    }

    fn fail(&mut self, err: ConsoleError) {
        warn!(error = %err, "action failed");
        self.notice = Some(Notice::from(err));
    }

    fn succeed(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::success(message));
    }

    fn username(&self) -> String {
        self.session
            .as_ref()
            .map(|s| s.username.clone())
            .unwrap_or_default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::init(&args)?;
    let _log_guard = logging::init(&config.log_file)?;
    let api = ApiClient::new(&config)?;
    info!(api = api.base_url(), "starting agency console");

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(api, &config);
    let result = run_app(&mut terminal, &mut app_state).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = %err, "console stopped");
        println!("Error: {}", err);
    }
    info!("agency console closed");

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| {
            match app_state.screen {
                AppScreen::Login => render_login(f, &mut app_state.login_state),
                AppScreen::Dashboard => {
                    if let Some(state) = &mut app_state.dashboard_state {
                        render_dashboard(f, state);
                    }
                }
                AppScreen::Clients => {
                    if let Some(state) = &mut app_state.clients_state {
                        render_clients(f, state);
                    }
                }
                AppScreen::ClientWizard => {
                    if let Some(state) = &mut app_state.client_wizard_state {
                        render_client_wizard(f, state);
                    }
                }
                AppScreen::TeamMembers => {
                    if let Some(state) = &mut app_state.team_members_state {
                        render_team_members(f, state);
                    }
                }
                AppScreen::TeamMemberWizard => {
                    if let Some(state) = &mut app_state.team_member_wizard_state {
                        render_team_member_wizard(f, state);
                    }
                }
                AppScreen::Projects => {
                    if let Some(state) = &mut app_state.projects_state {
                        render_projects(f, state);
                    }
                }
                AppScreen::ProjectWizard => {
                    if let Some(state) = &mut app_state.project_wizard_state {
                        render_project_wizard(f, state);
                    }
                }
                AppScreen::TeamAssignment => {
                    if let Some(state) = &mut app_state.projects_state {
                        render_projects(f, state);
                    }
                    if let Some(state) = &mut app_state.team_assignment_state {
                        render_team_assignment(f, state);
                    }
                }
                AppScreen::Payments => {
                    if let Some(state) = &mut app_state.payments_state {
                        render_payments(f, state);
                    }
                }
                AppScreen::PaymentWizard => {
                    if let Some(state) = &mut app_state.payment_wizard_state {
                        render_payment_wizard(f, state);
                    }
                }
            }

            if let Some(notice) = &app_state.notice {
                render_notice(f, notice);
            }
        })?;

        // A notice swallows the next key press
        if app_state.notice.is_some() {
            if let Event::Key(_) = event::read()? {
                app_state.notice = None;
            }
            continue;
        }

        let should_quit = match app_state.screen {
            AppScreen::Login => handle_login_screen(app_state).await?,
            AppScreen::Dashboard => handle_dashboard_screen(app_state).await?,
            AppScreen::Clients => handle_clients_screen(app_state).await?,
            AppScreen::ClientWizard => handle_client_wizard_screen(app_state).await?,
            AppScreen::TeamMembers => handle_team_members_screen(app_state).await?,
            AppScreen::TeamMemberWizard => handle_team_member_wizard_screen(app_state).await?,
            AppScreen::Projects => handle_projects_screen(app_state).await?,
            AppScreen::ProjectWizard => handle_project_wizard_screen(app_state).await?,
            AppScreen::TeamAssignment => handle_team_assignment_screen(app_state).await?,
            AppScreen::Payments => handle_payments_screen(app_state).await?,
            AppScreen::PaymentWizard => handle_payment_wizard_screen(app_state).await?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

async fn handle_login_screen(app_state: &mut AppState) -> Result<bool> {
    match handle_login_input(&mut app_state.login_state)? {
        Some(LoginAction::Quit) => return Ok(true),
        Some(LoginAction::Submit(credentials)) => {
            if let Some(session) = app_state.login_state.attempt(&app_state.auth, &credentials) {
                app_state.session = Some(session);
                app_state.login_state = LoginState::new();
                open_dashboard(app_state).await;
            }
        }
        None => {}
    }
    Ok(false)
}

async fn open_dashboard(app_state: &mut AppState) {
    match app_state.api.fetch_summary().await {
        Ok(summary) => {
            app_state.dashboard_state = Some(DashboardState::new(app_state.username(), summary));
        }
        Err(err) => {
            // Still show the dashboard so navigation works without numbers
            if app_state.dashboard_state.is_none() {
                app_state.dashboard_state = Some(DashboardState::new(app_state.username(), Default::default()));
            }
            app_state.fail(err);
        }
    }
    app_state.screen = AppScreen::Dashboard;
}

async fn handle_dashboard_screen(app_state: &mut AppState) -> Result<bool> {
    let Some(state) = &mut app_state.dashboard_state else {
        return Ok(false);
    };
    match handle_dashboard_input(state)? {
        Some(DashboardAction::Quit) => return Ok(true),
        Some(DashboardAction::Logout) => {
            if let Some(session) = app_state.session.take() {
                info!(username = %session.username, since = %session.started_at, "logged out");
            }
            app_state.dashboard_state = None;
            app_state.screen = AppScreen::Login;
        }
        Some(DashboardAction::Refresh) => open_dashboard(app_state).await,
        Some(DashboardAction::OpenClients) => open_clients(app_state).await,
        Some(DashboardAction::OpenTeamMembers) => open_team_members(app_state).await,
        Some(DashboardAction::OpenProjects) => open_projects(app_state).await,
        Some(DashboardAction::OpenPayments) => open_payments(app_state).await,
        None => {}
    }
    Ok(false)
}

async fn open_clients(app_state: &mut AppState) {
    match app_state.api.list_clients().await {
        Ok(clients) => {
            app_state.clients_state = Some(ClientsState::new(clients));
            app_state.client_wizard_state = None;
            app_state.screen = AppScreen::Clients;
        }
        Err(err) => app_state.fail(err),
    }
}

async fn handle_clients_screen(app_state: &mut AppState) -> Result<bool> {
    let Some(state) = &mut app_state.clients_state else {
        return Ok(false);
    };
    match handle_clients_input(state)? {
        Some(ClientAction::Back) => open_dashboard(app_state).await,
        Some(ClientAction::NewClient) => {
            app_state.client_wizard_state = Some(ClientWizardState::new());
            app_state.screen = AppScreen::ClientWizard;
        }
        Some(ClientAction::EditClient(client)) => {
            app_state.client_wizard_state = Some(ClientWizardState::from_existing(client));
            app_state.screen = AppScreen::ClientWizard;
        }
        Some(ClientAction::DeleteClient(id)) => {
            match app_state.api.delete_client(id).await {
                Ok(()) => app_state.succeed("Client deleted successfully"),
                Err(err) => app_state.fail(err),
            }
            open_clients(app_state).await;
        }
        None => {}
    }
    Ok(false)
}

async fn handle_client_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    let Some(state) = &mut app_state.client_wizard_state else {
        return Ok(false);
    };
    match handle_client_wizard_input(state)? {
        Some(ClientWizardAction::Cancel) => open_clients(app_state).await,
        Some(ClientWizardAction::Invalid(err)) => app_state.fail(err),
        Some(ClientWizardAction::Save(client)) => {
            let result = if client.is_new() {
                app_state.api.create_client(&client).await.map(|_| "Client added successfully")
            } else {
                app_state.api.update_client(&client).await.map(|_| "Client updated successfully")
            };
            match result {
                Ok(message) => {
                    app_state.succeed(message);
                    open_clients(app_state).await;
                }
                // The wizard stays open so nothing typed is lost
                Err(err) => app_state.fail(err),
            }
        }
        None => {}
    }
    Ok(false)
}

async fn open_team_members(app_state: &mut AppState) {
    match app_state.api.list_team_members().await {
        Ok(members) => {
            app_state.team_members_state = Some(TeamMembersState::new(members));
            app_state.team_member_wizard_state = None;
            app_state.screen = AppScreen::TeamMembers;
        }
        Err(err) => app_state.fail(err),
    }
}

async fn handle_team_members_screen(app_state: &mut AppState) -> Result<bool> {
    let Some(state) = &mut app_state.team_members_state else {
        return Ok(false);
    };
    match handle_team_members_input(state)? {
        Some(TeamMemberAction::Back) => open_dashboard(app_state).await,
        Some(TeamMemberAction::NewMember) => {
            app_state.team_member_wizard_state = Some(TeamMemberWizardState::new());
            app_state.screen = AppScreen::TeamMemberWizard;
        }
        Some(TeamMemberAction::EditMember(member)) => {
            app_state.team_member_wizard_state = Some(TeamMemberWizardState::from_existing(member));
            app_state.screen = AppScreen::TeamMemberWizard;
        }
        Some(TeamMemberAction::DeleteMember(id)) => {
            match app_state.api.delete_team_member(id).await {
                Ok(()) => app_state.succeed("Team member deleted successfully"),
                Err(err) => app_state.fail(err),
            }
            open_team_members(app_state).await;
        }
        None => {}
    }
    Ok(false)
}

async fn handle_team_member_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    let Some(state) = &mut app_state.team_member_wizard_state else {
        return Ok(false);
    };
    match handle_team_member_wizard_input(state)? {
        Some(TeamMemberWizardAction::Cancel) => open_team_members(app_state).await,
        Some(TeamMemberWizardAction::Invalid(err)) => app_state.fail(err),
        Some(TeamMemberWizardAction::Save(member)) => {
            let result = if member.is_new() {
                app_state.api.create_team_member(&member).await.map(|_| "Team member added successfully")
            } else {
                app_state.api.update_team_member(&member).await.map(|_| "Team member updated successfully")
            };
            match result {
                Ok(message) => {
                    app_state.succeed(message);
                    open_team_members(app_state).await;
                }
                Err(err) => app_state.fail(err),
            }
        }
        None => {}
    }
    Ok(false)
}

async fn open_projects(app_state: &mut AppState) {
    match app_state.api.list_projects().await {
        Ok(projects) => {
            app_state.projects_state = Some(ProjectsState::new(projects));
            app_state.project_wizard_state = None;
            app_state.team_assignment_state = None;
            app_state.screen = AppScreen::Projects;
        }
        Err(err) => app_state.fail(err),
    }
}

async fn handle_projects_screen(app_state: &mut AppState) -> Result<bool> {
    let Some(state) = &mut app_state.projects_state else {
        return Ok(false);
    };
    match handle_projects_input(state)? {
        Some(ProjectAction::Back) => open_dashboard(app_state).await,
        Some(ProjectAction::NewProject) => {
            let api = &app_state.api;
            match tokio::try_join!(api.client_dropdown(), api.team_member_dropdown()) {
                Ok((clients, team)) => {
                    app_state.project_wizard_state = Some(ProjectWizardState::new(clients, team));
                    app_state.screen = AppScreen::ProjectWizard;
                }
                Err(err) => app_state.fail(err),
            }
        }
        Some(ProjectAction::EditProject(project)) => {
            let api = &app_state.api;
            match tokio::try_join!(api.client_dropdown(), api.team_member_dropdown()) {
                Ok((clients, team)) => {
                    app_state.project_wizard_state =
                        Some(ProjectWizardState::from_existing(project, clients, team));
                    app_state.screen = AppScreen::ProjectWizard;
                }
                Err(err) => app_state.fail(err),
            }
        }
        Some(ProjectAction::DeleteProject(id)) => {
            match app_state.api.delete_project(id).await {
                Ok(()) => app_state.succeed("Project deleted successfully"),
                Err(err) => app_state.fail(err),
            }
            open_projects(app_state).await;
        }
        Some(ProjectAction::ManageTeam(project)) => match app_state.api.team_member_dropdown().await {
            Ok(team) => {
                app_state.team_assignment_state = Some(TeamAssignmentState::new(&project, team));
                app_state.screen = AppScreen::TeamAssignment;
            }
            Err(err) => app_state.fail(err),
        },
        Some(ProjectAction::ExportStatement(project)) => {
            let api = &app_state.api;
            match tokio::try_join!(api.list_clients(), api.list_payments()) {
                Ok((clients, payments)) => {
                    let statement = ProjectStatement::new(&project, &clients, &payments);
                    match StatementWriter::new(&app_state.output_dir).and_then(|w| w.write(&statement)) {
                        Ok(path) => app_state.succeed(format!("Statement saved to {}", path.display())),
                        Err(err) => {
                            error!(project = project.id, error = %err, "statement export failed");
                            app_state.notice = Some(Notice::error("Export Failed", err.to_string()));
                        }
                    }
                }
                Err(err) => app_state.fail(err),
            }
        }
        None => {}
    }
    Ok(false)
}

async fn handle_project_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    let Some(state) = &mut app_state.project_wizard_state else {
        return Ok(false);
    };
    match handle_project_wizard_input(state)? {
        Some(ProjectWizardAction::Cancel) => open_projects(app_state).await,
        Some(ProjectWizardAction::Invalid(err)) => app_state.fail(err),
        Some(ProjectWizardAction::Save(draft)) => {
            let result = match draft.id {
                None => app_state.api.create_project(&draft.payload).await.map(|_| "Project created successfully"),
                Some(id) => app_state
                    .api
                    .update_project(id, &draft.payload)
                    .await
                    .map(|_| "Project updated successfully"),
            };
            match result {
                Ok(message) => {
                    app_state.succeed(message);
                    open_projects(app_state).await;
                }
                Err(err) => app_state.fail(err),
            }
        }
        None => {}
    }
    Ok(false)
}

async fn handle_team_assignment_screen(app_state: &mut AppState) -> Result<bool> {
    let Some(state) = &mut app_state.team_assignment_state else {
        return Ok(false);
    };
    match handle_team_assignment_input(state)? {
        Some(TeamAssignmentAction::Close) => {
            app_state.team_assignment_state = None;
            app_state.screen = AppScreen::Projects;
        }
        Some(TeamAssignmentAction::Warn(err)) => app_state.fail(err),
        Some(TeamAssignmentAction::Save {
            project_id,
            current,
            desired,
        }) => {
            match reconcile::reconcile(&app_state.api, &FullReplace, project_id, &current, &desired).await {
                Ok(_) => app_state.succeed("Team members updated successfully"),
                Err(err) => app_state.fail(err),
            }
            // Reload either way: a failed run may have applied some calls
            open_projects(app_state).await;
        }
        None => {}
    }
    Ok(false)
}

async fn open_payments(app_state: &mut AppState) {
    match app_state.api.list_payments().await {
        Ok(payments) => {
            app_state.payments_state = Some(PaymentsState::new(payments));
            app_state.payment_wizard_state = None;
            app_state.screen = AppScreen::Payments;
        }
        Err(err) => app_state.fail(err),
    }
}

async fn handle_payments_screen(app_state: &mut AppState) -> Result<bool> {
    let Some(state) = &mut app_state.payments_state else {
        return Ok(false);
    };
    match handle_payments_input(state)? {
        Some(PaymentAction::Back) => open_dashboard(app_state).await,
        Some(PaymentAction::NewPayment) => match app_state.api.client_dropdown().await {
            Ok(clients) => {
                app_state.payment_wizard_state = Some(PaymentWizardState::new(clients));
                app_state.screen = AppScreen::PaymentWizard;
            }
            Err(err) => app_state.fail(err),
        },
        Some(PaymentAction::EditPayment(record)) => {
            let clients = match app_state.api.client_dropdown().await {
                Ok(clients) => clients,
                Err(err) => {
                    app_state.fail(err);
                    return Ok(false);
                }
            };
            let mut links = resolve::resolve_payment_links(&app_state.api, &clients, &record).await;
            let issues = std::mem::take(&mut links.issues);

            match PaymentWizardState::from_record(&record, clients, links) {
                Ok(wizard) => {
                    app_state.payment_wizard_state = Some(wizard);
                    app_state.screen = AppScreen::PaymentWizard;
                    app_state.notice = Notice::from_errors(&issues);
                }
                Err(err) => app_state.fail(err),
            }
        }
        Some(PaymentAction::DeletePayment(id)) => {
            match app_state.api.delete_payment(id).await {
                Ok(()) => app_state.succeed("Payment deleted successfully"),
                Err(err) => app_state.fail(err),
            }
            open_payments(app_state).await;
        }
        None => {}
    }
    Ok(false)
}

async fn handle_payment_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    let Some(state) = &mut app_state.payment_wizard_state else {
        return Ok(false);
    };
    match handle_payment_wizard_input(state)? {
        Some(PaymentWizardAction::Cancel) => open_payments(app_state).await,
        Some(PaymentWizardAction::Invalid(err)) => app_state.fail(err),
        Some(PaymentWizardAction::ClientChanged(client_id)) => {
            match app_state.api.projects_by_client(client_id).await {
                Ok(projects) => {
                    if let Some(state) = &mut app_state.payment_wizard_state {
                        state.set_projects(projects);
                    }
                }
                Err(err) => app_state.fail(err),
            }
        }
        Some(PaymentWizardAction::Save(draft)) => {
            let result = match draft.id {
                None => app_state.api.create_payment(&draft.payload).await.map(|_| "Payment created successfully"),
                Some(id) => app_state
                    .api
                    .update_payment(id, &draft.payload)
                    .await
                    .map(|_| "Payment updated successfully"),
            };
            match result {
                Ok(message) => {
                    app_state.succeed(message);
                    open_payments(app_state).await;
                }
                Err(err) => app_state.fail(err),
            }
        }
        None => {}
    }
    Ok(false)
}

//! Staffdesk - command-line client for the staffing dashboard
//!
//! The main entry point for the `staffdesk` binary, handling:
//! - Login and the persisted session
//! - Employee, skill, site, assignment and server management
//! - The dashboard summary
//! - AI report generation, history, standalone page and PDF export

use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sd_common::{
    AssignmentStatus, ContractType, EmployeeStatus, EmployeeUpdate, Error, NewAssignment,
    NewEmployee, OutputFormat, RecordId, ServerForm, ServerStatus, SiteForm, SiteStatus,
    SkillLevel, User,
};
use sd_config::{ClientConfig, ConfigOverrides};
use sd_core::api::ApiClient;
use sd_core::exit_codes::ExitCode;
use sd_core::logging::{generate_run_id, init_logging, LogConfig, LogLevel};
use sd_core::output::{records, render_json, section, CliError, MdTable};
use sd_core::pages::assignments::{candidate_employees, list_assignments};
use sd_core::pages::dashboard::DashboardPage;
use sd_core::pages::employees::{
    register_employee, register_error_message, skill_groups, EmployeeFilter, EmployeeListPage,
    RegisterOutcome,
};
use sd_core::pages::reports::{ReportPage, GENERATE_FAILED_MESSAGE};
use sd_core::pages::servers::ServerPage;
use sd_core::pages::sites::SitePage;
use sd_core::pages::today;
use sd_core::session::{login_error_message, AppState, LoginOutcome, SessionStore};
use sd_report::ReportTheme;
use serde::Serialize;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Staffdesk - staffing dashboard client
#[derive(Parser)]
#[command(name = "staffdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Backend base URL (overrides STAFFDESK_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Path to a config.json file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "md")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    no_color: bool,

    /// Request timeout (seconds)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Directory holding the session file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the user
    Login(LoginArgs),

    /// Forget the stored login
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Headcount, distribution and expiry alerts
    Dashboard,

    /// Employee roster
    Employee(EmployeeArgs),

    /// Skill catalogue grouped by category
    Skills,

    /// Client sites
    Site(SiteArgs),

    /// Placements of employees at sites
    Assignment(AssignmentArgs),

    /// Server inventory and liveness checks
    Server(ServerArgs),

    /// AI summary reports
    Report(ReportArgs),

    /// Configuration management
    Config(ConfigArgs),
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long, short = 'u')]
    username: String,

    #[arg(long, env = "STAFFDESK_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct EmployeeArgs {
    #[command(subcommand)]
    command: EmployeeCommands,
}

#[derive(Subcommand, Debug)]
enum EmployeeCommands {
    /// List employees
    List {
        /// Filter by status (파견중, 대기, 재직, 퇴사)
        #[arg(long)]
        status: Option<String>,

        /// Search by name, part or skill
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one employee
    Show { id: RecordId },
    /// Register a new employee
    Register(RegisterArgs),
    /// Change fields of an employee
    Update {
        id: RecordId,

        #[command(flatten)]
        fields: EmployeeFieldArgs,

        #[arg(long)]
        status: Option<String>,
    },
    /// Delete an employee
    Delete {
        id: RecordId,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
struct EmployeeFieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    age: Option<u32>,
    #[arg(long)]
    address: Option<String>,
    /// Applied part, e.g. Backend
    #[arg(long)]
    part: Option<String>,
    #[arg(long)]
    position: Option<String>,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[command(flatten)]
    fields: EmployeeFieldArgs,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    birth_date: Option<String>,

    /// Hire date (YYYY-MM-DD)
    #[arg(long)]
    hire_date: Option<String>,

    /// Skill id, optionally with a level: `3` or `3:고급`
    #[arg(long = "skill", value_parser = parse_skill)]
    skills: Vec<(RecordId, Option<SkillLevel>)>,
}

#[derive(Args, Debug)]
struct SiteArgs {
    #[command(subcommand)]
    command: SiteCommands,
}

#[derive(Subcommand, Debug)]
enum SiteCommands {
    /// List sites
    List,
    /// Show a site with its running placements
    Show { id: RecordId },
    /// Add a site
    Add {
        name: String,
        #[command(flatten)]
        fields: SiteFieldArgs,
    },
    /// Change fields of a site
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: SiteFieldArgs,
    },
    /// Delete a site
    Delete {
        id: RecordId,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct SiteFieldArgs {
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    contact_person: Option<String>,
    #[arg(long)]
    contact_phone: Option<String>,
    /// Contract start (YYYY-MM-DD)
    #[arg(long)]
    contract_start: Option<String>,
    /// Contract end (YYYY-MM-DD)
    #[arg(long)]
    contract_end: Option<String>,
    /// Contract amount in won
    #[arg(long)]
    contract_amount: Option<String>,
    /// 파견, 도급 or 프리랜서
    #[arg(long)]
    contract_type: Option<String>,
    /// 진행중, 종료 or 대기
    #[arg(long)]
    status: Option<String>,
}

#[derive(Args, Debug)]
struct AssignmentArgs {
    #[command(subcommand)]
    command: AssignmentCommands,
}

#[derive(Subcommand, Debug)]
enum AssignmentCommands {
    /// List placements
    List {
        /// 진행중 or 종료
        #[arg(long)]
        status: Option<String>,
    },
    /// Standby employees available for a placement
    Candidates,
    /// Place an employee at a site
    Assign {
        #[arg(long)]
        employee: RecordId,
        #[arg(long)]
        site: RecordId,
        /// Start date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Monthly rate in won
        #[arg(long)]
        rate: Option<String>,
    },
    /// End a running placement today
    End {
        id: RecordId,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct ServerArgs {
    #[command(subcommand)]
    command: ServerCommands,
}

#[derive(Subcommand, Debug)]
enum ServerCommands {
    /// List servers
    List,
    /// Add a server
    Add {
        name: String,
        #[command(flatten)]
        fields: ServerFieldArgs,
    },
    /// Change fields of a server
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ServerFieldArgs,
    },
    /// Delete a server
    Delete {
        id: RecordId,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Probe liveness of one server, or of every server in list order
    Check {
        #[arg(conflicts_with = "all")]
        id: Option<RecordId>,
        #[arg(long)]
        all: bool,
    },
}

#[derive(Args, Debug)]
struct ServerFieldArgs {
    #[arg(long)]
    ip: Option<String>,
    #[arg(long)]
    os: Option<String>,
    #[arg(long)]
    purpose: Option<String>,
    #[arg(long)]
    cpu: Option<String>,
    #[arg(long)]
    memory: Option<String>,
    #[arg(long)]
    disk: Option<String>,
    /// 운영중, 점검중 or 중지
    #[arg(long)]
    status: Option<String>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[command(subcommand)]
    command: ReportCommands,
}

#[derive(Subcommand, Debug)]
enum ReportCommands {
    /// Generate a report, save it to history and print it
    Generate {
        /// Also export the report as a one-page PDF
        #[arg(long)]
        export: bool,
        /// Export directory (defaults to the configured export_dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// List saved reports
    History,
    /// Print a saved report
    Show { id: RecordId },
    /// Export a saved report as a one-page PDF
    Export {
        id: RecordId,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Write the standalone HTML report page
    Page {
        /// Output file
        #[arg(long)]
        out: PathBuf,
        /// Show this saved report
        #[arg(long, conflicts_with = "generate")]
        id: Option<RecordId>,
        /// Generate a fresh report first
        #[arg(long)]
        generate: bool,
        #[arg(long, value_enum, default_value = "auto")]
        theme: ThemeArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    Auto,
}

impl From<ThemeArg> for ReportTheme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => ReportTheme::Light,
            ThemeArg::Dark => ReportTheme::Dark,
            ThemeArg::Auto => ReportTheme::Auto,
        }
    }
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved configuration and where each value came from
    Show,
}

fn parse_skill(raw: &str) -> Result<(RecordId, Option<SkillLevel>), String> {
    let (id, level) = match raw.split_once(':') {
        Some((id, level)) => (id, Some(SkillLevel::from(level.trim()))),
        None => (raw, None),
    };
    let id = id
        .trim()
        .parse::<RecordId>()
        .map_err(|_| format!("'{}' is not a skill id", raw))?;
    Ok((id, level))
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    // Usage errors exit with ERR_ARGS rather than clap's default 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    let log_config = LogConfig::from_env(cli_level, None).with_color(!cli.global.no_color);
    init_logging(&log_config);

    let run_id = generate_run_id();
    let span = tracing::info_span!("run", run_id = %run_id);
    let _entered = span.enter();

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            debug!(code = err.code, headline = %err.headline, "command failed");
            match cli.global.format {
                OutputFormat::Json => eprintln!("{}", err.render_json()),
                OutputFormat::Md => eprint!("{}", err.render_text()),
            }
            err.exit
        }
    };

    std::process::exit(exit_code.as_i32());
}

type CmdResult = Result<ExitCode, CliError>;

fn run(cli: &Cli) -> CmdResult {
    let ctx = Ctx::load(&cli.global)?;
    match &cli.command {
        Commands::Login(args) => run_login(ctx, args),
        Commands::Logout => run_logout(ctx),
        Commands::Whoami => run_whoami(&ctx),
        Commands::Dashboard => run_dashboard(&ctx),
        Commands::Employee(args) => run_employee(&ctx, &args.command),
        Commands::Skills => run_skills(&ctx),
        Commands::Site(args) => run_site(&ctx, &args.command),
        Commands::Assignment(args) => run_assignment(&ctx, &args.command),
        Commands::Server(args) => run_server(&ctx, &args.command),
        Commands::Report(args) => run_report(&ctx, &args.command),
        Commands::Config(args) => match args.command {
            ConfigCommands::Show => run_config_show(&ctx),
        },
    }
}

/// Resolved configuration and the backend client for one invocation.
struct Ctx {
    format: OutputFormat,
    config: ClientConfig,
    api: ApiClient,
}

impl Ctx {
    fn load(global: &GlobalOpts) -> Result<Self, CliError> {
        let overrides = ConfigOverrides {
            api_url: global.api_url.clone(),
            config_path: global.config.clone(),
            timeout_secs: global.timeout,
            data_dir: global.data_dir.clone(),
            export_dir: None,
        };
        let config = ClientConfig::resolve(&overrides)?;
        let api = ApiClient::from_config(&config);
        Ok(Self {
            format: global.format,
            config,
            api,
        })
    }

    fn state(&self) -> Result<AppState, CliError> {
        Ok(AppState::load(&self.config.data_dir)?)
    }

    /// Page commands need a logged-in user.
    fn signed_in(&self) -> Result<User, CliError> {
        let state = self.state()?;
        let user = state.require_user()?.clone();
        debug!(username = %user.username, "session loaded");
        Ok(user)
    }

    fn emit<T: Serialize + ?Sized>(&self, value: &T, md: impl FnOnce() -> String) -> CmdResult {
        match self.format {
            OutputFormat::Json => println!("{}", render_json(value)?),
            OutputFormat::Md => print!("{}", md()),
        }
        Ok(ExitCode::Clean)
    }

    /// Short confirmation of a mutation.
    fn done(&self, message: &str, id: Option<RecordId>) -> CmdResult {
        let value = serde_json::json!({ "ok": true, "id": id, "message": message });
        self.emit(&value, || format!("{}\n", message))
    }
}

/// Ask on the terminal unless `assume_yes`. Without a terminal the answer is no.
fn confirmer(assume_yes: bool) -> impl FnOnce(&str) -> bool {
    move |prompt: &str| {
        if assume_yes {
            return true;
        }
        if !std::io::stdin().is_terminal() {
            warn!(prompt, "no terminal to confirm on; pass --yes");
            return false;
        }
        eprint!("{} [y/N] ", prompt);
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes" | "예" | "네"
        )
    }
}

fn declined() -> CmdResult {
    eprintln!("취소되었습니다.");
    Ok(ExitCode::Declined)
}

fn not_found(kind: &str, id: RecordId) -> CliError {
    CliError::from(Error::Validation(format!("{} #{}을(를) 찾을 수 없습니다.", kind, id)))
}

// ============================================================================
// Session
// ============================================================================

fn run_login(ctx: Ctx, args: &LoginArgs) -> CmdResult {
    let mut state = match ctx.state() {
        Ok(state) => state,
        Err(err) => {
            warn!(headline = %err.headline, "ignoring unreadable session");
            SessionStore::new(&ctx.config.data_dir).clear()?;
            ctx.state()?
        }
    };
    match state.login(&ctx.api, &args.username, &args.password) {
        Ok(LoginOutcome::LoggedIn(user)) => ctx.emit(&user, || {
            format!("{}님, 환영합니다.\n", user.display_name())
        }),
        Ok(LoginOutcome::Rejected(message)) => Err(CliError::new(ExitCode::Rejected, message)),
        Err(err) => Err(CliError::from(&err).titled(login_error_message(&err))),
    }
}

fn run_logout(ctx: Ctx) -> CmdResult {
    match ctx.state() {
        Ok(mut state) => state.logout()?,
        Err(_) => SessionStore::new(&ctx.config.data_dir).clear()?,
    }
    ctx.done("로그아웃되었습니다.", None)
}

fn run_whoami(ctx: &Ctx) -> CmdResult {
    let user = ctx.signed_in()?;
    ctx.emit(&user, || records::whoami(&user))
}

// ============================================================================
// Dashboard
// ============================================================================

fn run_dashboard(ctx: &Ctx) -> CmdResult {
    ctx.signed_in()?;
    let mut page = DashboardPage::default();
    page.refresh(&ctx.api)?;
    let stats = page.stats.unwrap_or_default();
    ctx.emit(&stats, || records::dashboard(&stats))
}

// ============================================================================
// Employees and skills
// ============================================================================

fn run_employee(ctx: &Ctx, command: &EmployeeCommands) -> CmdResult {
    ctx.signed_in()?;
    match command {
        EmployeeCommands::List { status, search } => {
            let filter = EmployeeFilter {
                status: status.as_deref().map(EmployeeStatus::from),
                search: search.clone(),
            };
            let mut page = EmployeeListPage::new(filter);
            page.refresh(&ctx.api)?;
            ctx.emit(&page.employees, || records::employees(&page.employees))
        }
        EmployeeCommands::Show { id } => {
            let mut page = EmployeeListPage::default();
            let employee = page.view(&ctx.api, *id)?;
            ctx.emit(employee, || records::employee_detail(employee))
        }
        EmployeeCommands::Register(args) => {
            let form = new_employee(args);
            match register_employee(&ctx.api, &form) {
                Ok(RegisterOutcome::Created(id)) => {
                    ctx.done(RegisterOutcome::Created(id).message(), Some(id))
                }
                Ok(RegisterOutcome::Rejected(message)) => {
                    Err(CliError::new(ExitCode::Rejected, message))
                }
                Err(err) => Err(CliError::from(&err).titled(register_error_message(&err))),
            }
        }
        EmployeeCommands::Update { id, fields, status } => {
            let update = EmployeeUpdate {
                name: fields.name.clone(),
                phone: fields.phone.clone(),
                email: fields.email.clone(),
                age: fields.age,
                applied_part: fields.part.clone(),
                address: fields.address.clone(),
                position: fields.position.clone(),
                status: status.as_deref().map(EmployeeStatus::from),
            };
            if update.is_empty() {
                return Err(Error::Validation("변경할 항목이 없습니다.".into()).into());
            }
            let mut page = EmployeeListPage::default();
            page.update(&ctx.api, *id, update)?;
            ctx.done("인력 정보가 수정되었습니다.", Some(*id))
        }
        EmployeeCommands::Delete { id, yes } => {
            let mut page = EmployeeListPage::default();
            if !page.delete(&ctx.api, *id, confirmer(*yes))? {
                return declined();
            }
            ctx.done("인력이 삭제되었습니다.", Some(*id))
        }
    }
}

fn new_employee(args: &RegisterArgs) -> NewEmployee {
    let fields = &args.fields;
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let mut form = NewEmployee {
        name: text(&fields.name),
        phone: text(&fields.phone),
        email: text(&fields.email),
        age: fields.age.map(|a| a.to_string()).unwrap_or_default(),
        birth_date: text(&args.birth_date),
        address: text(&fields.address),
        applied_part: text(&fields.part),
        position: text(&fields.position),
        hire_date: text(&args.hire_date),
        skills: Vec::new(),
    };
    for (id, level) in &args.skills {
        if !form.skills.iter().any(|s| s.id == *id) {
            form.toggle_skill(*id);
        }
        if let Some(level) = level {
            form.set_skill_level(*id, level.clone());
        }
    }
    form
}

fn run_skills(ctx: &Ctx) -> CmdResult {
    ctx.signed_in()?;
    let groups = skill_groups(&ctx.api)?;
    let value: Vec<serde_json::Value> = groups
        .iter()
        .map(|(category, skills)| serde_json::json!({ "category": category, "skills": skills }))
        .collect();
    ctx.emit(&value, || records::skill_groups(&groups))
}

// ============================================================================
// Sites and assignments
// ============================================================================

fn apply_site_fields(form: &mut SiteForm, fields: &SiteFieldArgs) {
    let set = |slot: &mut String, value: &Option<String>| {
        if let Some(v) = value {
            *slot = v.clone();
        }
    };
    set(&mut form.address, &fields.address);
    set(&mut form.contact_person, &fields.contact_person);
    set(&mut form.contact_phone, &fields.contact_phone);
    set(&mut form.contract_start, &fields.contract_start);
    set(&mut form.contract_end, &fields.contract_end);
    set(&mut form.contract_amount, &fields.contract_amount);
    if let Some(kind) = &fields.contract_type {
        form.contract_type = ContractType::from(kind.as_str());
    }
    if let Some(status) = &fields.status {
        form.status = SiteStatus::from(status.as_str());
    }
}

fn run_site(ctx: &Ctx, command: &SiteCommands) -> CmdResult {
    ctx.signed_in()?;
    let mut page = SitePage::default();
    match command {
        SiteCommands::List => {
            page.refresh(&ctx.api)?;
            ctx.emit(&page.sites, || records::sites(&page.sites))
        }
        SiteCommands::Show { id } => {
            page.refresh(&ctx.api)?;
            let site = page
                .sites
                .iter()
                .find(|s| s.id == *id)
                .ok_or_else(|| not_found("사이트", *id))?;
            let placed = page.assignments_at(*id);
            let value = serde_json::json!({ "site": site, "assignments": placed });
            ctx.emit(&value, || {
                format!(
                    "{}\n{}",
                    records::sites(std::slice::from_ref(site)),
                    section("현재 파견 인력", &records::active_assignments(placed.iter().copied()))
                )
            })
        }
        SiteCommands::Add { name, fields } => {
            let mut form = SiteForm::new(name.clone());
            apply_site_fields(&mut form, fields);
            page.save(&ctx.api, None, &form)?;
            ctx.done("사이트가 등록되었습니다.", None)
        }
        SiteCommands::Update { id, name, fields } => {
            page.refresh(&ctx.api)?;
            let mut form = page
                .sites
                .iter()
                .find(|s| s.id == *id)
                .map(|s| s.to_form())
                .ok_or_else(|| not_found("사이트", *id))?;
            if let Some(name) = name {
                form.name = name.clone();
            }
            apply_site_fields(&mut form, fields);
            page.save(&ctx.api, Some(*id), &form)?;
            ctx.done("사이트 정보가 수정되었습니다.", Some(*id))
        }
        SiteCommands::Delete { id, yes } => {
            if !page.delete(&ctx.api, *id, confirmer(*yes))? {
                return declined();
            }
            ctx.done("사이트가 삭제되었습니다.", Some(*id))
        }
    }
}

fn run_assignment(ctx: &Ctx, command: &AssignmentCommands) -> CmdResult {
    ctx.signed_in()?;
    match command {
        AssignmentCommands::List { status } => {
            let status = status.as_deref().map(AssignmentStatus::from);
            let list = list_assignments(&ctx.api, status.as_ref())?;
            ctx.emit(&list, || records::assignments(&list))
        }
        AssignmentCommands::Candidates => {
            let list = candidate_employees(&ctx.api)?;
            ctx.emit(&list, || records::candidates(&list))
        }
        AssignmentCommands::Assign {
            employee,
            site,
            start,
            end,
            rate,
        } => {
            let mut assignment = NewAssignment::starting(*employee, *site, today());
            if let Some(start) = start {
                assignment.start_date = start.clone();
            }
            assignment.end_date = end.clone().unwrap_or_default();
            assignment.monthly_rate = rate.clone().unwrap_or_default();
            let mut page = SitePage::default();
            page.assign(&ctx.api, &assignment)?;
            ctx.done("파견이 등록되었습니다.", None)
        }
        AssignmentCommands::End { id, yes } => {
            let mut page = SitePage::default();
            if !page.end_assignment(&ctx.api, *id, today(), confirmer(*yes))? {
                return declined();
            }
            ctx.done("파견이 종료되었습니다.", Some(*id))
        }
    }
}

// ============================================================================
// Servers
// ============================================================================

fn apply_server_fields(form: &mut ServerForm, fields: &ServerFieldArgs) {
    let set = |slot: &mut String, value: &Option<String>| {
        if let Some(v) = value {
            *slot = v.clone();
        }
    };
    set(&mut form.ip_address, &fields.ip);
    set(&mut form.os, &fields.os);
    set(&mut form.purpose, &fields.purpose);
    set(&mut form.cpu, &fields.cpu);
    set(&mut form.memory, &fields.memory);
    set(&mut form.disk, &fields.disk);
    if let Some(status) = &fields.status {
        form.status = ServerStatus::from(status.as_str());
    }
}

fn run_server(ctx: &Ctx, command: &ServerCommands) -> CmdResult {
    ctx.signed_in()?;
    let mut page = ServerPage::default();
    match command {
        ServerCommands::List => {
            page.refresh(&ctx.api)?;
            ctx.emit(&page.servers, || records::servers(&page.servers))
        }
        ServerCommands::Add { name, fields } => {
            let mut form = ServerForm::new(name.clone());
            apply_server_fields(&mut form, fields);
            page.save(&ctx.api, None, &form)?;
            ctx.done("서버가 등록되었습니다.", None)
        }
        ServerCommands::Update { id, name, fields } => {
            page.refresh(&ctx.api)?;
            let mut form = page
                .servers
                .iter()
                .find(|s| s.id == *id)
                .map(|s| s.to_form())
                .ok_or_else(|| not_found("서버", *id))?;
            if let Some(name) = name {
                form.name = name.clone();
            }
            apply_server_fields(&mut form, fields);
            page.save(&ctx.api, Some(*id), &form)?;
            ctx.done("서버 정보가 수정되었습니다.", Some(*id))
        }
        ServerCommands::Delete { id, yes } => {
            if !page.delete(&ctx.api, *id, confirmer(*yes))? {
                return declined();
            }
            ctx.done("서버가 삭제되었습니다.", Some(*id))
        }
        ServerCommands::Check { id: Some(id), .. } => {
            page.refresh(&ctx.api)?;
            if !page.servers.iter().any(|s| s.id == *id) {
                return Err(not_found("서버", *id));
            }
            page.check(&ctx.api, *id)?;
            let checked: Vec<_> = page.servers.iter().filter(|s| s.id == *id).collect();
            ctx.emit(&checked, || {
                let owned: Vec<_> = checked.iter().map(|s| (*s).clone()).collect();
                records::servers(&owned)
            })
        }
        ServerCommands::Check { id: None, .. } => {
            page.refresh(&ctx.api)?;
            let report = page.check_all(&ctx.api);
            let value = serde_json::json!({ "report": report, "servers": page.servers });
            ctx.emit(&value, || records::check_report(&report, &page.servers))?;
            if report.failed.is_empty() {
                Ok(ExitCode::Clean)
            } else {
                Ok(ExitCode::PartialFail)
            }
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

fn generate(ctx: &Ctx, page: &mut ReportPage) -> Result<(), CliError> {
    page.generate(&ctx.api, Local::now())
        .map_err(|err| CliError::from(&err).titled(GENERATE_FAILED_MESSAGE))
}

fn run_report(ctx: &Ctx, command: &ReportCommands) -> CmdResult {
    ctx.signed_in()?;
    let mut page = ReportPage::default();
    match command {
        ReportCommands::Generate { export, dir } => {
            generate(ctx, &mut page)?;
            let pdf = if *export {
                let dir = dir.clone().unwrap_or_else(|| ctx.config.export_dir.clone());
                Some(page.export(&dir, today())?)
            } else {
                None
            };
            let state = page.state();
            let value = serde_json::json!({
                "report": state.report(),
                "stats": state.stats(),
                "pdf": pdf,
            });
            ctx.emit(&value, || {
                let mut out = state.report().map(records::report).unwrap_or_default();
                if let Some(path) = &pdf {
                    out.push_str(&format!("\nPDF: {}\n", path.display()));
                }
                out
            })
        }
        ReportCommands::History => {
            page.refresh_history(&ctx.api)?;
            ctx.emit(page.history(), || records::report_history(page.history()))
        }
        ReportCommands::Show { id } => {
            page.view(&ctx.api, *id)?;
            let report = page.state().report();
            ctx.emit(&report, || report.map(records::report).unwrap_or_default())
        }
        ReportCommands::Export { id, dir } => {
            page.view(&ctx.api, *id)?;
            let dir = dir.clone().unwrap_or_else(|| ctx.config.export_dir.clone());
            let path = page.export(&dir, today())?;
            info!(path = %path.display(), "report exported");
            let value = serde_json::json!({ "ok": true, "id": id, "pdf": path });
            ctx.emit(&value, || format!("PDF: {}\n", path.display()))
        }
        ReportCommands::Page {
            out,
            id,
            generate: fresh,
            theme,
        } => {
            // The page still renders without history.
            let _ = page.refresh_history(&ctx.api);
            let outcome = match (*id, *fresh) {
                (Some(id), _) => page.view(&ctx.api, id).map_err(CliError::from),
                (None, true) => generate(ctx, &mut page),
                (None, false) => Ok(()),
            };
            std::fs::write(out, page.page_html((*theme).into())).map_err(Error::Io)?;
            info!(path = %out.display(), state = page.state().name(), "report page written");
            outcome?;
            ctx.done("보고서 페이지를 저장했습니다.", page.state().report().and_then(|r| r.id))
        }
    }
}

// ============================================================================
// Config
// ============================================================================

fn run_config_show(ctx: &Ctx) -> CmdResult {
    let config = &ctx.config;
    ctx.emit(config, || {
        let file = config
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        let mut table = MdTable::new(["key", "value", "source"]);
        table
            .row([
                "config file".to_string(),
                file,
                config.file_source.to_string(),
            ])
            .row([
                "api_url".to_string(),
                config.api_url.clone(),
                config.api_url_source.to_string(),
            ])
            .row([
                "timeout_secs".to_string(),
                config.timeout_secs.to_string(),
                config.timeout_source.to_string(),
            ])
            .row([
                "data_dir".to_string(),
                config.data_dir.display().to_string(),
                config.data_dir_source.to_string(),
            ])
            .row([
                "export_dir".to_string(),
                config.export_dir.display().to_string(),
                String::new(),
            ]);
        table.render()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_skill() {
        assert_eq!(parse_skill("3").unwrap(), (3, None));
        assert_eq!(
            parse_skill("4:고급").unwrap(),
            (4, Some(SkillLevel::Advanced))
        );
        assert!(parse_skill("java").is_err());
    }

    #[test]
    fn test_new_employee_skills_default_to_intermediate() {
        let args = RegisterArgs {
            fields: EmployeeFieldArgs {
                name: Some("이영희".into()),
                ..Default::default()
            },
            birth_date: None,
            hire_date: None,
            skills: vec![(1, None), (2, Some(SkillLevel::Beginner)), (1, None)],
        };
        let form = new_employee(&args);
        assert_eq!(form.skills.len(), 2);
        assert_eq!(form.skills[0].level, SkillLevel::Intermediate);
        assert_eq!(form.skills[1].level, SkillLevel::Beginner);
    }
}

//! Markdown renditions of backend records.

use super::{section, MdTable};
use crate::pages::dashboard::headline;
use crate::pages::servers::CheckReport;
use sd_common::format::{date_part, format_krw, or_dash};
use sd_common::{
    Assignment, DashboardStats, Employee, Report, ReportSummary, Server, ServerSummary, Skill,
    Site, StatusDot, User,
};
use sd_report::page::EMPTY_HISTORY_MESSAGE;

pub const NO_SITE_STATS_MESSAGE: &str = "파견 데이터가 없습니다";
pub const NO_STATUS_DATA_MESSAGE: &str = "인원 데이터가 없습니다";
pub const NO_EMPLOYEES_MESSAGE: &str = "등록된 인력이 없습니다";
pub const NO_EXPIRING_CONTRACTS_MESSAGE: &str = "30일 이내 만료 예정 계약이 없습니다";
pub const NO_EXPIRING_ASSIGNMENTS_MESSAGE: &str = "30일 이내 파견 만료 예정 인력이 없습니다";
pub const NO_SERVERS_MESSAGE: &str = "등록된 서버가 없습니다";
pub const NO_SITES_MESSAGE: &str = "등록된 사이트가 없습니다";
pub const NO_ACTIVE_ASSIGNMENTS_MESSAGE: &str = "현재 파견중인 인력이 없습니다";
pub const NO_ASSIGNMENTS_MESSAGE: &str = "파견 기록이 없습니다";
pub const NO_CANDIDATES_MESSAGE: &str = "대기 상태의 인력이 없습니다";
pub const NO_SKILLS_MESSAGE: &str = "등록된 기술이 없습니다";

fn opt_date(raw: Option<&str>) -> &str {
    raw.map(date_part).filter(|d| !d.trim().is_empty()).unwrap_or("-")
}

fn label_or_dash<T>(value: Option<&T>, label: impl Fn(&T) -> &str) -> String {
    value.map(|v| label(v).to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn employees(list: &[Employee]) -> String {
    employee_table(list, NO_EMPLOYEES_MESSAGE)
}

/// Employees in the standby pool, offered when assigning.
pub fn candidates(list: &[Employee]) -> String {
    employee_table(list, NO_CANDIDATES_MESSAGE)
}

fn employee_table(list: &[Employee], empty: &str) -> String {
    if list.is_empty() {
        return format!("{}\n", empty);
    }
    let mut table = MdTable::new(["ID", "이름", "지원파트", "직급", "연락처", "상태", "기술"]);
    for emp in list {
        let skills = emp.skill_tags().join(", ");
        table.row([
            emp.id.to_string(),
            emp.name.clone(),
            or_dash(emp.applied_part.as_deref()).to_string(),
            or_dash(emp.position.as_deref()).to_string(),
            or_dash(emp.phone.as_deref()).to_string(),
            label_or_dash(emp.status.as_ref(), |s| s.label()),
            or_dash(Some(skills.as_str())).to_string(),
        ]);
    }
    table.render()
}

pub fn employee_detail(emp: &Employee) -> String {
    let age = emp.age.map(|a| a.to_string());
    let skills = emp.skill_tags().join(", ");
    let status = label_or_dash(emp.status.as_ref(), |s| s.label());
    let fields: [(&str, &str); 11] = [
        ("이름", emp.name.as_str()),
        ("상태", status.as_str()),
        ("연락처", or_dash(emp.phone.as_deref())),
        ("이메일", or_dash(emp.email.as_deref())),
        ("나이", or_dash(age.as_deref())),
        ("생년월일", opt_date(emp.birth_date.as_deref())),
        ("주소", or_dash(emp.address.as_deref())),
        ("지원파트", or_dash(emp.applied_part.as_deref())),
        ("직급", or_dash(emp.position.as_deref())),
        ("입사일", opt_date(emp.hire_date.as_deref())),
        ("기술", or_dash(Some(skills.as_str()))),
    ];
    let mut out = format!("# {} (#{})\n\n", emp.name, emp.id);
    for (label, value) in fields {
        out.push_str(&format!("- **{}**: {}\n", label, value));
    }
    out
}

pub fn skill_groups(groups: &[(String, Vec<Skill>)]) -> String {
    if groups.is_empty() {
        return format!("{}\n", NO_SKILLS_MESSAGE);
    }
    let mut out = String::new();
    for (category, skills) in groups {
        let items: Vec<String> = skills
            .iter()
            .map(|s| format!("- {} (#{})", s.name, s.id))
            .collect();
        out.push_str(&section(category, &items.join("\n")));
        out.push('\n');
    }
    out
}

pub fn sites(list: &[Site]) -> String {
    if list.is_empty() {
        return format!("{}\n", NO_SITES_MESSAGE);
    }
    let mut table = MdTable::new([
        "ID", "사이트명", "주소", "담당자", "계약기간", "계약금액", "계약형태", "상태", "인원",
    ]);
    for site in list {
        let period = format!(
            "{} ~ {}",
            opt_date(site.contract_start.as_deref()),
            opt_date(site.contract_end.as_deref())
        );
        let contact = match (&site.contact_person, &site.contact_phone) {
            (Some(person), Some(phone)) => format!("{} ({})", person, phone),
            (Some(person), None) => person.clone(),
            (None, phone) => or_dash(phone.as_deref()).to_string(),
        };
        table.row([
            site.id.to_string(),
            site.name.clone(),
            or_dash(site.address.as_deref()).to_string(),
            contact,
            period,
            format_krw(site.contract_amount),
            label_or_dash(site.contract_type.as_ref(), |t| t.label()),
            site.status_or_default().label().to_string(),
            site.employee_count.unwrap_or(0).to_string(),
        ]);
    }
    table.render()
}

pub fn assignments(list: &[Assignment]) -> String {
    assignment_table(list, NO_ASSIGNMENTS_MESSAGE)
}

/// Running placements at one site.
pub fn active_assignments<'a>(list: impl IntoIterator<Item = &'a Assignment>) -> String {
    let list: Vec<Assignment> = list.into_iter().cloned().collect();
    assignment_table(&list, NO_ACTIVE_ASSIGNMENTS_MESSAGE)
}

fn assignment_table(list: &[Assignment], empty: &str) -> String {
    if list.is_empty() {
        return format!("{}\n", empty);
    }
    let mut table = MdTable::new([
        "ID", "인력", "사이트", "지원파트", "시작일", "종료일", "월 단가", "상태",
    ]);
    for a in list {
        table.row([
            a.id.to_string(),
            or_dash(a.employee_name.as_deref()).to_string(),
            or_dash(a.site_name.as_deref()).to_string(),
            or_dash(a.applied_part.as_deref()).to_string(),
            opt_date(a.start_date.as_deref()).to_string(),
            opt_date(a.end_date.as_deref()).to_string(),
            format_krw(a.monthly_rate),
            label_or_dash(a.status.as_ref(), |s| s.label()),
        ]);
    }
    table.render()
}

fn dot_glyph(dot: StatusDot) -> &'static str {
    match dot {
        StatusDot::Online => "🟢",
        StatusDot::Maintenance => "🟡",
        StatusDot::Offline => "🔴",
    }
}

pub fn server_summary(summary: &ServerSummary) -> String {
    format!(
        "전체 {}  ·  운영중 {}  ·  점검중 {}  ·  중지 {}\n",
        summary.total, summary.running, summary.maintenance, summary.stopped
    )
}

pub fn servers(list: &[Server]) -> String {
    if list.is_empty() {
        return format!("{}\n", NO_SERVERS_MESSAGE);
    }
    let mut table = MdTable::new(["", "ID", "서버명", "IP", "OS", "용도", "사양", "상태"]);
    for server in list {
        let specs = server.spec_lines().join(", ");
        table.row([
            dot_glyph(server.status_dot()).to_string(),
            server.id.to_string(),
            server.name.clone(),
            or_dash(server.ip_address.as_deref()).to_string(),
            or_dash(server.os.as_deref()).to_string(),
            or_dash(server.purpose.as_deref()).to_string(),
            or_dash(Some(specs.as_str())).to_string(),
            server.status_text(),
        ]);
    }
    format!(
        "{}\n{}",
        server_summary(&ServerSummary::from_servers(list)),
        table.render()
    )
}

pub fn check_report(report: &CheckReport, servers: &[Server]) -> String {
    let mut out = format!("점검 완료 {}대", report.checked.len());
    if !report.failed.is_empty() {
        out.push_str(&format!(", 실패 {}대", report.failed.len()));
    }
    out.push_str("\n\n");
    out.push_str(&self::servers(servers));
    if !report.failed.is_empty() {
        out.push('\n');
        for (id, reason) in &report.failed {
            out.push_str(&format!("- #{}: {}\n", id, reason));
        }
    }
    out
}

pub fn dashboard(stats: &DashboardStats) -> String {
    let mut out = String::from("# 대시보드\n\n");

    let cards = headline(stats);
    let mut table = MdTable::new(cards.iter().map(|(label, _)| *label));
    table.row(cards.iter().map(|(_, value)| value.to_string()));
    out.push_str(&table.render());
    out.push('\n');

    let distribution = stats.status_distribution();
    let body = if distribution.is_empty() {
        NO_STATUS_DATA_MESSAGE.to_string()
    } else {
        distribution
            .iter()
            .map(|(status, count)| format!("- {}: {}", status.label(), count))
            .collect::<Vec<_>>()
            .join("\n")
    };
    out.push_str(&section("상태별 인원", &body));
    out.push('\n');

    let body = if stats.site_stats.is_empty() {
        NO_SITE_STATS_MESSAGE.to_string()
    } else {
        let mut table = MdTable::new(["사이트", "인원"]);
        for stat in &stats.site_stats {
            table.row([stat.site_name.clone(), stat.employee_count.to_string()]);
        }
        table.render()
    };
    out.push_str(&section("사이트별 파견 인원", &body));
    out.push('\n');

    out.push_str(&section("최근 등록 인력", &employees(&stats.recent_employees)));
    out.push('\n');

    let body = if stats.expiring_contracts.is_empty() {
        NO_EXPIRING_CONTRACTS_MESSAGE.to_string()
    } else {
        let mut table = MdTable::new(["사이트", "계약 종료일", "남은 기간", "긴급도"]);
        for contract in &stats.expiring_contracts {
            table.row([
                contract.name.clone(),
                opt_date(contract.contract_end.as_deref()).to_string(),
                format!("D-{}", contract.days_left),
                severity_label(contract.severity()).to_string(),
            ]);
        }
        table.render()
    };
    out.push_str(&section("계약 만료 예정", &body));
    out.push('\n');

    let body = if stats.expiring_assignments.is_empty() {
        NO_EXPIRING_ASSIGNMENTS_MESSAGE.to_string()
    } else {
        let mut table = MdTable::new(["인력", "지원파트", "사이트", "파견 종료일", "남은 기간", "긴급도"]);
        for a in &stats.expiring_assignments {
            table.row([
                a.employee_name.clone(),
                or_dash(a.applied_part.as_deref()).to_string(),
                a.site_name.clone(),
                opt_date(a.end_date.as_deref()).to_string(),
                format!("D-{}", a.days_left),
                severity_label(a.severity()).to_string(),
            ]);
        }
        table.render()
    };
    out.push_str(&section("파견 만료 예정", &body));
    out
}

fn severity_label(severity: sd_common::Severity) -> &'static str {
    match severity {
        sd_common::Severity::Danger => "긴급",
        sd_common::Severity::Warning => "주의",
    }
}

pub fn report_history(items: &[ReportSummary]) -> String {
    if items.is_empty() {
        return format!("{}\n", EMPTY_HISTORY_MESSAGE);
    }
    let mut table = MdTable::new(["ID", "제목", "생성일시"]);
    for item in items {
        table.row([
            item.id.to_string(),
            item.title.clone(),
            item.generated_at_display(),
        ]);
    }
    table.render()
}

/// The report text as the backend wrote it, under a title line.
pub fn report(report: &Report) -> String {
    let mut out = format!("# {}\n\n", report.display_title());
    if let Some(ts) = report.generated_at_display() {
        out.push_str(&format!("생성일시: {}\n\n", ts));
    }
    out.push_str(report.content.trim_end());
    out.push('\n');
    out
}

pub fn whoami(user: &User) -> String {
    let mut out = format!("{} ({})\n", user.display_name(), user.username);
    if let Some(role) = &user.role {
        out.push_str(&format!("권한: {}\n", role));
    }
    out
}

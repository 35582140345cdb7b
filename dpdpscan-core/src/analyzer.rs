//! Heuristic rule engine and compliance scorer.
//!
//! The engine runs a fixed, ordered battery of pattern rules over the
//! acquired content blob. Each rule is a pure predicate that either emits
//! exactly one [`Violation`] or nothing; rule order is output order. This is
//! substring/regex matching over flat text, not static analysis.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::blob::ContentBlob;
use crate::domain::{SCAN_METHOD, ScanReport, Severity, Violation};
use crate::repo::RepoRef;

/// Maximum number of violations included in a report.
pub const MAX_REPORTED_VIOLATIONS: usize = 10;

/// Compiled patterns for the rule battery.
struct Patterns {
    secret_assignment: Regex,
    secret_export: Regex,
    password_assignment: Regex,
    password_hashing: Regex,
    personal_data_assignment: Regex,
    retention_terms: Regex,
    collection_flow: Regex,
    consent_terms: Regex,
    database_terms: Regex,
    audit_terms: Regex,
    input_terms: Regex,
    validation_terms: Regex,
    log_call: Regex,
    sensitive_terms: Regex,
    route_declaration: Regex,
    access_control_terms: Regex,
}

static PATTERNS: Lazy<Patterns> = Lazy::new(|| Patterns {
    secret_assignment: Regex::new(
        r#"(?i)(password|api_key|secret_key|token|aws_secret|db_password)\s*=\s*['"]"#,
    )
    .expect("regex: secret assignment"),
    secret_export: Regex::new(r#"(?i)export\s+\w*(password|api_key|secret)\s*=\s*['"]"#)
        .expect("regex: secret export"),
    password_assignment: Regex::new(r"(?i)password\s*=").expect("regex: password assignment"),
    password_hashing: Regex::new(r"(?i)(bcrypt|argon2|scrypt|hash)")
        .expect("regex: password hashing"),
    personal_data_assignment: Regex::new(r"(?i)(user|customer|data)\s*=")
        .expect("regex: personal data assignment"),
    retention_terms: Regex::new(r"(?i)(retention|delete|expire|ttl|created_at)")
        .expect("regex: retention terms"),
    collection_flow: Regex::new(r"(?is)(register|signup|collect|form).*user")
        .expect("regex: collection flow"),
    consent_terms: Regex::new(r"(?i)(consent|agree|privacy)").expect("regex: consent terms"),
    database_terms: Regex::new(r"(?i)(database|query|select|insert|update)")
        .expect("regex: database terms"),
    audit_terms: Regex::new(r"(?i)(audit|log_access|log_action)").expect("regex: audit terms"),
    input_terms: Regex::new(r"(?i)(request|form|input|post|get)").expect("regex: input terms"),
    validation_terms: Regex::new(r"(?i)(validate|schema|sanitize)")
        .expect("regex: validation terms"),
    log_call: Regex::new(r"(?i)(print|logger|log)\(").expect("regex: log call"),
    sensitive_terms: Regex::new(r"(?i)(password|token|email|ssn)")
        .expect("regex: sensitive terms"),
    route_declaration: Regex::new(r"(?i)(@app\.route|@route|def\s+\w+.*request)")
        .expect("regex: route declaration"),
    access_control_terms: Regex::new(r"(?i)(@auth|@login_required|permission)")
        .expect("regex: access control terms"),
});

fn violation(violation_type: &str, file: &str, severity: Severity, fix: &str) -> Violation {
    Violation {
        violation_type: violation_type.to_string(),
        file: file.to_string(),
        line: 0,
        severity,
        fix: fix.to_string(),
    }
}

/// Run the rule battery against the blob text and return violations in rule
/// order.
pub fn evaluate(content: &str) -> Vec<Violation> {
    let patterns = &*PATTERNS;
    let content_lower = content.to_lowercase();
    let mut violations = Vec::new();

    // 1. Hardcoded secrets. Only the first matching sub-pattern contributes.
    if patterns.secret_assignment.is_match(content) {
        violations.push(violation(
            "Hardcoded Secrets",
            "Configuration files",
            Severity::Critical,
            "Move secrets to environment variables and load them at startup",
        ));
    } else if patterns.secret_export.is_match(content) {
        violations.push(violation(
            "Hardcoded Credentials",
            "Configuration files",
            Severity::Critical,
            "Move secrets to environment variables and load them at startup",
        ));
    }

    // 2. Passwords stored without a hashing library in sight.
    if patterns.password_assignment.is_match(content)
        && !patterns.password_hashing.is_match(content)
    {
        violations.push(violation(
            "Missing Password Encryption",
            "User/Auth models",
            Severity::Critical,
            "Hash passwords with bcrypt or argon2 before storing them",
        ));
    }

    // 3. Personal data handled with no retention vocabulary.
    if patterns.personal_data_assignment.is_match(content)
        && !patterns.retention_terms.is_match(content)
    {
        violations.push(violation(
            "No Data Retention Policy",
            "Data models",
            Severity::High,
            "Define a retention window and delete or expire records past it",
        ));
    }

    // 4. Data collection flows with no consent vocabulary.
    if patterns.collection_flow.is_match(content) && !patterns.consent_terms.is_match(content) {
        violations.push(violation(
            "No Consent Tracking",
            "User registration",
            Severity::High,
            "Record explicit user consent at collection time",
        ));
    }

    // 5. Database activity with no audit vocabulary.
    if patterns.database_terms.is_match(content) && !patterns.audit_terms.is_match(content) {
        violations.push(violation(
            "Missing Audit Logging",
            "Database operations",
            Severity::High,
            "Write an audit log entry for every data access and mutation",
        ));
    }

    // 6. Plain HTTP with no HTTPS anywhere. Case-sensitive match.
    if content.contains("http://") && !content.contains("https://") {
        violations.push(violation(
            "Unencrypted Communication",
            "API endpoints",
            Severity::High,
            "Serve all endpoints over HTTPS and enforce TLS",
        ));
    }

    // 7. Inbound data handling with no validation vocabulary.
    if patterns.input_terms.is_match(content) && !patterns.validation_terms.is_match(content) {
        violations.push(violation(
            "Missing Input Validation",
            "API handlers",
            Severity::Medium,
            "Validate and sanitize every inbound field against a schema",
        ));
    }

    // 8. Logging calls co-occurring with sensitive field names.
    if patterns.log_call.is_match(content) && patterns.sensitive_terms.is_match(content) {
        violations.push(violation(
            "Sensitive Data in Logs",
            "Logging code",
            Severity::Medium,
            "Mask or drop sensitive fields before they reach the logs",
        ));
    }

    // 9. Route declarations with no access-control vocabulary.
    if patterns.route_declaration.is_match(content)
        && !patterns.access_control_terms.is_match(content)
    {
        violations.push(violation(
            "Missing Access Controls",
            "API endpoints",
            Severity::Medium,
            "Require authentication or a permission check on every handler",
        ));
    }

    // 10. A .env file referenced with no gitignore in sight.
    if content.contains(".env") && !content_lower.contains("gitignore") {
        violations.push(violation(
            "Secrets Not in .gitignore",
            ".gitignore",
            Severity::Low,
            "Add .env to .gitignore so secrets stay out of version control",
        ));
    }

    violations
}

/// Compute the compliance score for a full violation list.
///
/// Starts at 100, subtracts each violation's severity deduction, and clamps
/// to 0-100. Order-independent.
pub fn calculate_score(violations: &[Violation]) -> u8 {
    let mut score: i32 = 100;
    for violation in violations {
        score -= violation.severity.deduction();
    }
    score.clamp(0, 100) as u8
}

/// Analyze an acquired content blob and build the scan report.
///
/// The score is computed over the full violation list before the list is
/// truncated to [`MAX_REPORTED_VIOLATIONS`] for display.
pub fn analyze(repo: &RepoRef, blob: &ContentBlob) -> ScanReport {
    let violations = evaluate(blob.text());
    let score = calculate_score(&violations);
    let total = violations.len();
    let summary = format!(
        "Scanned {}/{}. Found {} DPDP violations. Score: {}/100",
        repo.owner, repo.repo, total, score
    );

    let mut violations = violations;
    violations.truncate(MAX_REPORTED_VIOLATIONS);

    ScanReport {
        score,
        violations,
        summary,
        scan_method: SCAN_METHOD.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{analyze, calculate_score, evaluate};
    use crate::blob::ContentBlob;
    use crate::domain::{Severity, Violation};
    use crate::repo::RepoRef;

    fn violation_types(content: &str) -> Vec<String> {
        evaluate(content)
            .into_iter()
            .map(|violation| violation.violation_type)
            .collect()
    }

    fn has_violation(content: &str, violation_type: &str) -> bool {
        violation_types(content)
            .iter()
            .any(|found| found == violation_type)
    }

    #[test]
    fn hardcoded_secret_assignment_is_flagged() {
        let content = r#"api_key = "sk-123456""#;
        let types = violation_types(content);
        assert!(types.contains(&"Hardcoded Secrets".to_string()));
    }

    #[test]
    fn shell_export_falls_back_to_credentials_rule() {
        let content = r#"export APP_SECRET='hunter2'"#;
        let types = violation_types(content);
        assert!(types.contains(&"Hardcoded Credentials".to_string()));
    }

    #[test]
    fn secret_rule_emits_at_most_one_violation() {
        let content = r#"
            password = "plain"
            export API_KEY='abc'
        "#;
        let secret_findings = evaluate(content)
            .into_iter()
            .filter(|violation| violation.severity == Severity::Critical)
            .filter(|violation| violation.file == "Configuration files")
            .count();
        assert_eq!(secret_findings, 1);
    }

    #[test]
    fn unhashed_password_is_flagged() {
        let content = r#"password = "x""#;
        assert!(has_violation(content, "Missing Password Encryption"));
    }

    #[test]
    fn hashing_mention_suppresses_password_rule() {
        let content = "password = request.form\nimport bcrypt";
        assert!(!has_violation(content, "Missing Password Encryption"));
    }

    #[test]
    fn retention_vocabulary_suppresses_retention_rule() {
        let flagged = "user = load_profile()";
        let mitigated = "user = load_profile()\n# rows expire after 365 days, see created_at";
        assert!(has_violation(flagged, "No Data Retention Policy"));
        assert!(!has_violation(mitigated, "No Data Retention Policy"));
    }

    #[test]
    fn consent_rule_spans_the_whole_blob() {
        let content = "def register():\n    pass\n\n# later on\nsave(user)";
        assert!(has_violation(content, "No Consent Tracking"));
    }

    #[test]
    fn plain_http_is_flagged_only_without_https() {
        let plain = "API = http://api.example.com";
        let mixed = "API = http://api.example.com\nCDN = https://cdn.example.com";
        let flagged = evaluate(plain);
        let unencrypted = flagged
            .iter()
            .find(|violation| violation.violation_type == "Unencrypted Communication")
            .expect("unencrypted communication flagged");
        assert_eq!(unencrypted.severity, Severity::High);
        assert!(!has_violation(mixed, "Unencrypted Communication"));
    }

    #[test]
    fn https_literal_does_not_trigger_http_rule() {
        // "https://" contains no bare "http://" substring.
        let content = "BASE = https://api.example.com";
        assert!(!has_violation(content, "Unencrypted Communication"));
    }

    #[test]
    fn sensitive_logging_is_flagged() {
        let content = r#"logger(f"user password is {password}")"#;
        assert!(has_violation(content, "Sensitive Data in Logs"));
    }

    #[test]
    fn unprotected_route_is_flagged() {
        let content = "@app.route('/profile')\ndef profile():\n    pass";
        assert!(has_violation(content, "Missing Access Controls"));
        let protected = "@app.route('/profile')\n@login_required\ndef profile():\n    pass";
        assert!(!has_violation(protected, "Missing Access Controls"));
    }

    #[test]
    fn env_without_gitignore_is_flagged() {
        assert!(has_violation("load('.env')", "Secrets Not in .gitignore"));
        assert!(!has_violation(
            "load('.env')\n--- .gitignore ---",
            "Secrets Not in .gitignore"
        ));
    }

    #[test]
    fn evaluation_is_order_stable() {
        let content = r#"
            password = "x"
            user = fetch()
            query = "SELECT * FROM users"
            url = http://internal.example.com
            print(password)
            .env
        "#;
        let first = evaluate(content);
        let second = evaluate(content);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn empty_blob_yields_no_violations_and_full_score() {
        let violations = evaluate("");
        assert!(violations.is_empty());
        assert_eq!(calculate_score(&violations), 100);
    }

    fn homogeneous(severity: Severity, count: usize) -> Vec<Violation> {
        (0..count)
            .map(|index| Violation {
                violation_type: format!("violation-{index}"),
                file: "test".to_string(),
                line: 0,
                severity,
                fix: "fix".to_string(),
            })
            .collect()
    }

    #[test]
    fn score_subtracts_per_severity() {
        assert_eq!(calculate_score(&homogeneous(Severity::Critical, 2)), 50);
        assert_eq!(calculate_score(&homogeneous(Severity::High, 3)), 55);
        assert_eq!(calculate_score(&homogeneous(Severity::Medium, 4)), 68);
        assert_eq!(calculate_score(&homogeneous(Severity::Low, 5)), 90);
    }

    #[test]
    fn score_clamps_at_zero() {
        // 5 criticals would be -25; the clamp floors at 0.
        assert_eq!(calculate_score(&homogeneous(Severity::Critical, 5)), 0);
    }

    #[test]
    fn analyze_builds_summary_from_full_violation_count() {
        let mut blob = ContentBlob::new();
        blob.append_file(
            "app.py",
            r#"
                password = "plain"
                user = request.form
                query = "SELECT * FROM users"
                url = "http://internal.example.com"
                print(password)
                def register(): save(user)
                load('.env')
            "#,
        );
        let repo = RepoRef {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
        };

        let report = analyze(&repo, &blob);

        let total = evaluate(blob.text()).len();
        assert!(report.summary.contains("acme/widgets"));
        assert!(report.summary.contains(&format!("Found {total} DPDP")));
        assert!(report.violations.len() <= 10);
        assert_eq!(
            report.score,
            calculate_score(&evaluate(blob.text())),
            "score reflects the full list, not the truncated one"
        );
    }

    #[test]
    fn analyze_truncates_but_scores_everything() {
        // Synthetic check of the truncation invariant using the scorer
        // directly: the score of 12 lows differs from the first 10.
        let all = homogeneous(Severity::Low, 12);
        let truncated = &all[..10];
        assert_eq!(calculate_score(&all), 76);
        assert_eq!(calculate_score(truncated), 80);
    }
}

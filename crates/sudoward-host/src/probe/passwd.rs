//! Account probe backed by the passwd and group databases.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use sudoward_core::config::HostConfig;
use sudoward_core::error::{AppError, ErrorKind};
use sudoward_core::result::AppResult;
use sudoward_core::traits::SystemProbe;
use sudoward_core::types::Principal;

/// A parsed passwd line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PasswdRecord<'a> {
    name: &'a str,
    gid: &'a str,
    home: &'a str,
}

/// A parsed group line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupRecord<'a> {
    name: &'a str,
    gid: &'a str,
    members: Vec<&'a str>,
}

/// `name:passwd:uid:gid:gecos:home:shell`
fn parse_passwd_line(line: &str) -> Option<PasswdRecord<'_>> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with('#') || line.starts_with('+') || line.starts_with('-')
    {
        return None;
    }
    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() < 7 || fields[0].is_empty() {
        return None;
    }
    Some(PasswdRecord {
        name: fields[0],
        gid: fields[3],
        home: fields[5],
    })
}

/// `name:passwd:gid:member,member`
fn parse_group_line(line: &str) -> Option<GroupRecord<'_>> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with('#') || line.starts_with('+') || line.starts_with('-')
    {
        return None;
    }
    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() < 4 || fields[0].is_empty() {
        return None;
    }
    let members = fields[3]
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .collect();
    Some(GroupRecord {
        name: fields[0],
        gid: fields[2],
        members,
    })
}

fn home_matches(home: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    home == prefix
        || home
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Reads account information straight from the host databases.
#[derive(Debug, Clone)]
pub struct PasswdProbe {
    passwd_path: PathBuf,
    group_path: PathBuf,
    home_prefixes: Vec<String>,
}

impl PasswdProbe {
    /// Create a probe from configuration.
    pub fn new(config: &HostConfig) -> Self {
        Self {
            passwd_path: PathBuf::from(&config.passwd_path),
            group_path: PathBuf::from(&config.group_path),
            home_prefixes: config.home_prefixes.clone(),
        }
    }

    async fn read_db(path: &Path) -> AppResult<String> {
        fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Probe,
                format!("Failed to read account database {}", path.display()),
                e,
            )
        })
    }

    async fn lookup_groups(&self, principal: &Principal) -> AppResult<Vec<String>> {
        let passwd = Self::read_db(&self.passwd_path).await?;
        let Some(primary_gid) = passwd
            .lines()
            .filter_map(parse_passwd_line)
            .find(|r| r.name == principal.as_str())
            .map(|r| r.gid.to_string())
        else {
            return Ok(Vec::new());
        };

        let group = Self::read_db(&self.group_path).await?;
        let records: Vec<GroupRecord<'_>> = group.lines().filter_map(parse_group_line).collect();

        let mut groups: Vec<String> = Vec::new();
        if let Some(primary) = records.iter().find(|g| g.gid == primary_gid) {
            groups.push(primary.name.to_string());
        }
        for record in &records {
            if record.members.contains(&principal.as_str())
                && !groups.iter().any(|g| g == record.name)
            {
                groups.push(record.name.to_string());
            }
        }
        Ok(groups)
    }
}

#[async_trait]
impl SystemProbe for PasswdProbe {
    async fn exists(&self, principal: &Principal) -> AppResult<bool> {
        let passwd = Self::read_db(&self.passwd_path).await?;
        Ok(passwd
            .lines()
            .filter_map(parse_passwd_line)
            .any(|r| r.name == principal.as_str()))
    }

    async fn groups(&self, principal: &Principal) -> Vec<String> {
        match self.lookup_groups(principal).await {
            Ok(groups) => groups,
            Err(e) => {
                debug!(principal = %principal, error = %e, "Group lookup failed");
                Vec::new()
            }
        }
    }

    async fn list_principals(&self) -> AppResult<Vec<Principal>> {
        let passwd = Self::read_db(&self.passwd_path).await?;
        let mut principals: Vec<Principal> = Vec::new();

        for record in passwd.lines().filter_map(parse_passwd_line) {
            if !self
                .home_prefixes
                .iter()
                .any(|p| home_matches(record.home, p))
            {
                continue;
            }
            match Principal::parse(record.name) {
                Ok(p) if !principals.contains(&p) => principals.push(p),
                Ok(_) => {}
                Err(e) => warn!(name = record.name, error = %e, "Skipping unusable account name"),
            }
        }

        Ok(principals)
    }
}

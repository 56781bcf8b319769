use std::env;
use std::path::{Path, PathBuf};

pub const STATE_DIR_NAME: &str = "chat_widget";
pub const TABS_DIR: &str = "tabs";

/// `$XDG_STATE_HOME/chat_widget`, else `~/.local/state/chat_widget`.
#[must_use]
pub fn default_state_root() -> Option<PathBuf> {
    if let Some(state_home) = env::var_os("XDG_STATE_HOME").filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(state_home).join(STATE_DIR_NAME));
    }
    env::var_os("HOME")
        .filter(|value| !value.is_empty())
        .map(|home| {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(STATE_DIR_NAME)
        })
}

#[must_use]
pub fn tab_root(state_root: &Path) -> PathBuf {
    state_root.join(TABS_DIR)
}

/// Key of the terminal tab this process runs in: the parent shell's pid.
#[must_use]
pub fn default_tab_key() -> String {
    #[cfg(unix)]
    {
        format!("ppid-{}", std::os::unix::process::parent_id())
    }
    #[cfg(not(unix))]
    {
        format!("pid-{}", std::process::id())
    }
}

/// Identity of the process that owns the tab key, so a reused parent pid is not
/// mistaken for the same tab. On Linux this is the parent's start time in clock
/// ticks since boot. `None` where the platform offers no such marker.
#[must_use]
pub fn default_tab_owner() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let ppid = std::os::unix::process::parent_id();
        let stat = std::fs::read_to_string(format!("/proc/{ppid}/stat")).ok()?;
        parse_start_time(&stat).map(|ticks| format!("start-{ticks}"))
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// Field 22 of `/proc/<pid>/stat`. The command name in field 2 may contain
/// spaces and parentheses, so fields are counted after the last `)`.
#[must_use]
pub fn parse_start_time(stat: &str) -> Option<u64> {
    let (_, rest) = stat.rsplit_once(')')?;
    rest.split_whitespace().nth(19)?.parse().ok()
}

#[must_use]
pub fn sanitize_tab_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '-',
        })
        .collect()
}

#[must_use]
pub fn tab_file_name(tab_key: &str) -> String {
    format!("{}.json", sanitize_tab_key(tab_key))
}

#[cfg(test)]
mod tests {
    use super::{parse_start_time, sanitize_tab_key, tab_file_name};

    #[test]
    fn tab_keys_are_made_filename_safe() {
        assert_eq!(sanitize_tab_key(" ppid-42 "), "ppid-42");
        assert_eq!(sanitize_tab_key("../etc/passwd"), "---etc-passwd");
        assert_eq!(tab_file_name("tty/3"), "tty-3.json");
    }

    #[test]
    fn start_time_is_read_after_the_command_name() {
        let stat = "4242 (my (odd) shell) S 1 4242 4242 34816 4242 4194560 1234 0 0 0 \
                    3 1 0 0 20 0 1 0 987654 12345678 900";
        assert_eq!(parse_start_time(stat), Some(987654));
        assert_eq!(parse_start_time("4242 (sh) S 1 2"), None);
        assert_eq!(parse_start_time("garbage"), None);
    }
}

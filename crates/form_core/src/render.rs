//! Static artifact display metadata and size formatting for the results
//! panel.

use shared::domain::ArtifactKind;
use shared::protocol::ArtifactDescriptor;

/// Title, icon name, and description shown for one artifact kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactDisplay {
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

pub fn artifact_display(kind: ArtifactKind) -> ArtifactDisplay {
    match kind {
        ArtifactKind::PgpPublic => ArtifactDisplay {
            title: "PGP Public Key",
            icon: "unlock",
            description: "Share this with others to encrypt messages for you",
        },
        ArtifactKind::PgpPrivate => ArtifactDisplay {
            title: "PGP Private Key",
            icon: "lock",
            description: "Keep this secret! Used to decrypt messages",
        },
        ArtifactKind::SshPublic => ArtifactDisplay {
            title: "SSH Public Key",
            icon: "terminal",
            description: "Add this to servers for authentication",
        },
        ArtifactKind::SshPrivate => ArtifactDisplay {
            title: "SSH Private Key",
            icon: "key",
            description: "Keep this secret! Used for server access",
        },
        ArtifactKind::Unknown => ArtifactDisplay {
            title: "Key File",
            icon: "file",
            description: "Generated key file",
        },
    }
}

/// One row of the download list, ready for the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadEntry {
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub filename: String,
    pub size_label: String,
    pub download_url: String,
}

pub fn build_download_entries(files: &[ArtifactDescriptor]) -> Vec<DownloadEntry> {
    files
        .iter()
        .map(|file| {
            let display = artifact_display(file.kind);
            DownloadEntry {
                title: display.title,
                icon: display.icon,
                description: display.description,
                filename: file.filename.clone(),
                size_label: format_file_size(file.size_bytes),
                download_url: file.download_url.clone(),
            }
        })
        .collect()
}

/// Formats a byte count with base-1024 units and one decimal place, the
/// unit chosen by `floor(log1024(bytes))` clamped to MB. Zero is special.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["B", "KB", "MB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    format!("{:.1} {}", bytes as f64 / scale as f64, UNITS[unit])
}

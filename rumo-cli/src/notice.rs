use colored::Colorize;
use rumo_lib::controller::{Notice, NoticeKind};

pub fn show(notice: &Notice) {
    match notice.kind {
        NoticeKind::Success => println!("{} {}", notice.title.green().bold(), notice.description),
        NoticeKind::Error => failure(&notice.title, &notice.description),
    }
}

pub fn show_all(notices: &[Notice]) {
    notices.iter().for_each(show);
}

pub fn failure(title: &str, description: &str) {
    eprintln!("{} {}", title.red().bold(), description);
}

pub fn has_error(notices: &[Notice]) -> bool {
    notices.iter().any(|notice| notice.kind == NoticeKind::Error)
}

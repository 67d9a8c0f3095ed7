//! Stock drive layout for a fresh session.

use crate::models::FileSystemItem as Item;

/// 2x2 monochrome BMP used as the default wallpaper.
const WALLPAPER_BMP: &[u8] = &[
    0x42, 0x4d, 0x46, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3e, 0x00, 0x00, 0x00, 0x28,
    0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff,
    0xff, 0x00, 0x40, 0x00, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00,
];

const README: &str = "Welcome to RetroOS!\n\
\n\
Try these commands:\n\
  dir            list the current folder\n\
  cd Desktop     change folder\n\
  type file.txt  show a text file\n\
  start notepad  open an application\n\
\n\
Type 'help' for the full list.";

const AUTOEXEC: &str = "@ECHO OFF\nPROMPT $P$G\nPATH C:\\Windows;C:\\Windows\\System32";

/// Build the default tree: a protected system skeleton on `C:` with a
/// writable guest profile.
pub fn default_tree() -> Item {
    let program = |folder: &str, exe: &str, app: &str| {
        let dir = format!("/C:/Program Files/{}", folder);
        Item::folder(folder, &dir)
            .protected(true)
            .with_children(vec![Item::file(exe, &format!("{}/{}", dir, exe), app).protected(true)])
    };

    Item::root().with_children(vec![Item::folder("C:", "/C:").protected(true).with_children(vec![
        Item::file("autoexec.bat", "/C:/autoexec.bat", AUTOEXEC).protected(true),
        Item::folder("Windows", "/C:/Windows").protected(true).with_children(vec![
            Item::folder("System32", "/C:/Windows/System32")
                .protected(true)
                .with_children(vec![
                    Item::file("config.sys", "/C:/Windows/System32/config.sys", "FILES=40\nBUFFERS=20")
                        .protected(true),
                    Item::file("cmd.exe", "/C:/Windows/System32/cmd.exe", "terminal").protected(true),
                ]),
            Item::file("notepad.exe", "/C:/Windows/notepad.exe", "notepad").protected(true),
            Item::file("explorer.exe", "/C:/Windows/explorer.exe", "explorer").protected(true),
            Item::file("mspaint.exe", "/C:/Windows/mspaint.exe", "paint").protected(true),
            Item::file("win.ini", "/C:/Windows/win.ini", "[windows]\nload=\nrun=").protected(true),
        ]),
        Item::folder("Program Files", "/C:/Program Files")
            .protected(true)
            .with_children(vec![
                program("Minesweeper", "winmine.exe", "minesweeper"),
                program("Snake", "snake.exe", "snake"),
                program("Assistant", "assistant.exe", "chat"),
            ]),
        Item::folder("Users", "/C:/Users").protected(true).with_children(vec![
            Item::folder("Guest", "/C:/Users/Guest").protected(false).with_children(vec![
                Item::folder("Desktop", "/C:/Users/Guest/Desktop")
                    .protected(false)
                    .with_children(vec![Item::file(
                        "readme.txt",
                        "/C:/Users/Guest/Desktop/readme.txt",
                        README,
                    )]),
                Item::folder("Documents", "/C:/Users/Guest/Documents")
                    .protected(false)
                    .with_children(vec![Item::file(
                        "todo.txt",
                        "/C:/Users/Guest/Documents/todo.txt",
                        "- water the plants\n- back up floppies",
                    )]),
                Item::folder("Pictures", "/C:/Users/Guest/Pictures")
                    .protected(false)
                    .with_children(vec![Item::binary(
                        "wallpaper.bmp",
                        "/C:/Users/Guest/Pictures/wallpaper.bmp",
                        WALLPAPER_BMP,
                    )]),
            ]),
        ]),
    ])])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::path;

    #[test]
    fn test_paths_match_tree_position() {
        let root = default_tree();
        fn check(item: &Item) {
            for child in item.children() {
                assert_eq!(child.path, path::join(&item.path, &child.name));
                check(child);
            }
        }
        check(&root);
    }

    #[test]
    fn test_system_skeleton_is_protected() {
        let root = default_tree();
        let drive = root.child("C:").unwrap();
        assert!(drive.is_protected && drive.is_system);
        assert!(drive.child("Windows").unwrap().is_protected);
        let guest = drive.child("Users").unwrap().child("Guest").unwrap();
        let documents = guest.child("Documents").unwrap();
        assert!(documents.is_protected);
        assert!(!documents.child("todo.txt").unwrap().is_protected);
    }

    #[test]
    fn test_ids_are_unique() {
        let root = default_tree();
        let mut ids: Vec<_> = root.walk().iter().map(|i| i.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}

//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::fs;

    use crate::common::{templater_command, write_file};

    const PAGE: &str = concat!(
        "<html><head><link rel=\"stylesheet\" href=\"css/site.css\"></head>",
        "<body><img src=\"https://cdn.example.com/logo.png\"><p>Body</p></body></html>"
    );

    #[test]
    fn rewritten_page_to_stdout() {
        let site = tempfile::tempdir().unwrap();
        write_file(site.path(), "page.html", PAGE);

        let out = templater_command(site.path())
            .args(["assets", "page.html"])
            .output()
            .unwrap();

        assert!(out.status.success());
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("href=\"{% static 'css/site.css' %}\""));
        assert!(stdout.contains("src=\"https://cdn.example.com/logo.png\""));
        assert!(!stdout.contains("{% load static %}"));
        assert!(!site.path().join("static/css/site.css").exists());
    }

    #[test]
    fn copy_into_output_directory() {
        let site = tempfile::tempdir().unwrap();
        write_file(site.path(), "css/site.css", "body{}");
        write_file(site.path(), "page.html", PAGE);

        templater_command(site.path())
            .args(["assets", "-c", "-o", "out", "page.html"])
            .assert()
            .success()
            .stdout("");

        let page = fs::read_to_string(site.path().join("out/page.html")).unwrap();
        assert!(page.contains("href=\"{% static 'css/site.css' %}\""));
        assert_eq!(
            fs::read_to_string(site.path().join("out/static/css/site.css")).unwrap(),
            "body{}"
        );
        // Remote image left alone, no directory for it
        assert!(!site.path().join("out/static/img").exists());
    }

    #[test]
    fn env_lists_variables() {
        let site = tempfile::tempdir().unwrap();

        let out = templater_command(site.path()).arg("env").output().unwrap();

        assert!(out.status.success());
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("TEMPLATER_TIMEOUT"));
        assert!(stdout.contains("TEMPLATER_DOWNLOAD_REMOTE"));
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use crate::common::{templater_command, write_file};

    #[test]
    fn pages_are_required() {
        let site = tempfile::tempdir().unwrap();

        templater_command(site.path())
            .arg("assets")
            .assert()
            .failure();
    }

    #[test]
    fn no_html_pages_given() {
        let site = tempfile::tempdir().unwrap();
        write_file(site.path(), "readme.md", "# nothing");

        templater_command(site.path())
            .args(["assets", "readme.md"])
            .assert()
            .code(1);
    }

    #[test]
    fn missing_local_asset_with_copy() {
        let site = tempfile::tempdir().unwrap();
        write_file(
            site.path(),
            "page.html",
            "<script src=\"js/missing.js\"></script>",
        );

        let out = templater_command(site.path())
            .args(["assets", "-c", "-o", "out", "page.html"])
            .output()
            .unwrap();

        assert_eq!(out.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&out.stderr).contains("page.html"));
        assert!(!site.path().join("out/page.html").exists());
    }

    #[test]
    fn invalid_environment_value() {
        let site = tempfile::tempdir().unwrap();
        write_file(site.path(), "page.html", "<p></p>");

        templater_command(site.path())
            .env("TEMPLATER_TIMEOUT", "soon")
            .args(["assets", "page.html"])
            .assert()
            .failure();
    }
}

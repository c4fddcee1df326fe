//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::fs;

    use templater::{Page, PageConverter, TemplateOutcome, TemplaterOptions};

    use crate::common::{list_dir, write_file, MemorySource};

    const MASTER: &str = concat!(
        "<html><head><link rel=\"stylesheet\" href=\"css/site.css\"></head>",
        "<body><div id=\"content\"><p>Master</p></div></body></html>"
    );

    const ABOUT: &str = concat!(
        "<html><head><link rel=\"stylesheet\" href=\"css/site.css\"></head>",
        "<body><div id=\"content\"><p>About</p><img src=\"img/team.png\"></div></body></html>"
    );

    #[test]
    fn base_template() {
        let site = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let static_dir = output.path().join("static");
        write_file(site.path(), "css/site.css", "body{}");
        let master = write_file(site.path(), "index.html", MASTER);

        let source = MemorySource::new();
        let options = TemplaterOptions::default();
        let converter = PageConverter::new(&source, &static_dir, &options);

        let page = Page::load(&source, master.to_str().unwrap()).unwrap();
        let TemplateOutcome::Rendered(text) = converter.base_template(&page, "content").unwrap()
        else {
            panic!("expected a rendered template");
        };

        assert_eq!(
            text,
            concat!(
                "{% load static %}\n",
                "<html><head><link rel=\"stylesheet\" href=\"{% static 'css/site.css' %}\"></head>",
                "<body><div id=\"content\">{% block main %}{% endblock %}</div></body></html>"
            )
        );
        assert_eq!(fs::read_to_string(static_dir.join("css/site.css")).unwrap(), "body{}");
    }

    #[test]
    fn leaf_template() {
        let site = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let static_dir = output.path().join("static");
        write_file(site.path(), "img/team.png", "PNG");
        let about = write_file(site.path(), "about.html", ABOUT);

        let source = MemorySource::new();
        let options = TemplaterOptions::default();
        let converter = PageConverter::new(&source, &static_dir, &options);

        let page = Page::load(&source, about.to_str().unwrap()).unwrap();
        let outcome = converter.leaf_template(&page, "content").unwrap();

        assert_eq!(
            outcome,
            TemplateOutcome::Rendered(
                concat!(
                    "{% extends 'base.html' %}\n",
                    "{% load static %}\n",
                    "\n",
                    "{% block content %}\n",
                    "<div id=\"content\"><p>About</p><img src=\"{% static 'img/team.png' %}\"></div>\n",
                    "{% endblock %}"
                )
                .to_string()
            )
        );
        // Only assets inside the region are relocated
        assert_eq!(list_dir(&static_dir), vec!["img"]);
    }

    #[test]
    fn leaf_with_repeated_image() {
        let site = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let static_dir = output.path().join("static");
        write_file(site.path(), "img/logo.png", "PNG");
        let page = write_file(
            site.path(),
            "gallery.html",
            concat!(
                "<div id=\"content\"><img src=\"img/logo.png\">",
                "<p>again</p><img src=\"img/logo.png\"></div>"
            ),
        );

        let source = MemorySource::new();
        let options = TemplaterOptions::default();
        let converter = PageConverter::new(&source, &static_dir, &options);

        let page = Page::load(&source, page.to_str().unwrap()).unwrap();
        let TemplateOutcome::Rendered(text) = converter.leaf_template(&page, "content").unwrap()
        else {
            panic!("expected a rendered template");
        };

        assert!(text.contains(concat!(
            "<div id=\"content\"><img src=\"{% static 'img/logo.png' %}\">",
            "<p>again</p><img src=\"{% static 'img/logo.png' %}\"></div>"
        )));
        assert_eq!(text.matches("{% static").count(), 2);
        assert_eq!(list_dir(&static_dir.join("img")), vec!["logo.png"]);
    }

    #[test]
    fn leaf_template_without_assets() {
        let source = MemorySource::new();
        let options = TemplaterOptions::default();
        let output = tempfile::tempdir().unwrap();
        let converter = PageConverter::new(&source, output.path(), &options);

        let page = Page::from_bytes("plain.html", b"<div id=\"main\">Text</div>");
        let outcome = converter.leaf_template(&page, "main").unwrap();

        assert_eq!(
            outcome,
            TemplateOutcome::Rendered(
                "{% extends 'base.html' %}\n\n{% block main %}\n<div id=\"main\">Text</div>\n{% endblock %}"
                    .to_string()
            )
        );
    }

    #[test]
    fn converting_twice_is_a_no_op() {
        let site = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let static_dir = output.path().join("static");
        write_file(site.path(), "css/site.css", "body{}");
        write_file(site.path(), "img/team.png", "PNG");
        let master = write_file(site.path(), "index.html", MASTER);
        let about = write_file(site.path(), "about.html", ABOUT);

        let source = MemorySource::new();
        let options = TemplaterOptions::default();
        let converter = PageConverter::new(&source, &static_dir, &options);

        let base = converter
            .write_base_template(master.to_str().unwrap(), "content", output.path())
            .unwrap()
            .unwrap();
        let leaf = converter
            .write_leaf_template(about.to_str().unwrap(), "content", output.path())
            .unwrap()
            .unwrap();

        assert_eq!(base, output.path().join("base.html"));
        assert_eq!(leaf, output.path().join("about.html"));

        let base_text = fs::read_to_string(&base).unwrap();
        let leaf_text = fs::read_to_string(&leaf).unwrap();

        let again = converter
            .base_template(&Page::from_bytes("base.html", base_text.as_bytes()), "content")
            .unwrap();
        assert_eq!(again, TemplateOutcome::AlreadyTemplate);

        let again = converter
            .leaf_template(&Page::from_bytes("about.html", leaf_text.as_bytes()), "content")
            .unwrap();
        assert_eq!(again, TemplateOutcome::AlreadyTemplate);

        assert_eq!(
            converter
                .write_leaf_template(leaf.to_str().unwrap(), "content", output.path())
                .unwrap(),
            None
        );
        assert_eq!(fs::read_to_string(&leaf).unwrap(), leaf_text);
    }

    #[test]
    fn remote_assets_left_alone_without_download() {
        let output = tempfile::tempdir().unwrap();
        let static_dir = output.path().join("static");
        let html = concat!(
            "<div id=\"content\">",
            "<script src=\"https://cdn.example.com/lib.js\"></script>",
            "</div>"
        );

        let source = MemorySource::new();
        let options = TemplaterOptions::default();
        let converter = PageConverter::new(&source, &static_dir, &options);

        let page = Page::from_bytes("page.html", html.as_bytes());
        let TemplateOutcome::Rendered(text) = converter.leaf_template(&page, "content").unwrap()
        else {
            panic!("expected a rendered template");
        };

        assert!(text.contains("src=\"https://cdn.example.com/lib.js\""));
        assert!(!static_dir.exists());
        assert!(source.requests().is_empty());
    }

    #[test]
    fn remote_page_assets_resolve_against_page_url() {
        let output = tempfile::tempdir().unwrap();
        let static_dir = output.path().join("static");
        let html = "<div id=\"content\"><img src=\"../img/a.png\"></div>";

        let source = MemorySource::new()
            .with("https://example.com/blog/post.html", html)
            .with("https://example.com/img/a.png", "PNG");
        let options = TemplaterOptions::default();
        let converter = PageConverter::new(&source, &static_dir, &options);

        let written = converter
            .write_leaf_template("https://example.com/blog/post.html", "content", output.path())
            .unwrap()
            .unwrap();

        assert_eq!(written, output.path().join("post.html"));
        assert_eq!(fs::read(static_dir.join("img/a.png")).unwrap(), b"PNG");
        assert!(fs::read_to_string(&written)
            .unwrap()
            .contains("{% static 'img/a.png' %}"));
    }

    #[test]
    fn rewrite_only() {
        let site = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let static_dir = output.path().join("static");
        let page = write_file(
            site.path(),
            "page.html",
            "<html><body><img src=\"logo.png\"><p>Keep me</p></body></html>",
        );

        let source = MemorySource::new();
        let options = TemplaterOptions {
            copy_assets: false,
            ..TemplaterOptions::default()
        };
        let converter = PageConverter::new(&source, &static_dir, &options);

        let written = converter
            .write_rewritten_page(page.to_str().unwrap(), output.path())
            .unwrap();

        assert_eq!(written, output.path().join("page.html"));
        assert_eq!(
            fs::read_to_string(&written).unwrap(),
            "<html><body><img src=\"{% static 'img/logo.png' %}\"><p>Keep me</p></body></html>"
        );
        assert!(!static_dir.join("img/logo.png").exists());
    }

    #[test]
    fn declared_charset_is_preserved() {
        let site = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let page = site.path().join("latin.html");
        fs::write(
            &page,
            b"<html><head><meta charset=\"iso-8859-1\"></head><body><div id=\"c\">caf\xe9</div></body></html>",
        )
        .unwrap();

        let source = MemorySource::new();
        let options = TemplaterOptions::default();
        let converter = PageConverter::new(&source, output.path(), &options);

        let written = converter
            .write_leaf_template(page.to_str().unwrap(), "c", output.path())
            .unwrap()
            .unwrap();

        let bytes = fs::read(written).unwrap();
        assert!(bytes.windows(4).any(|window| window == b"caf\xe9"));
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
    use templater::{PageConverter, TemplaterError, TemplaterOptions};

    use crate::common::{list_dir, write_file, MemorySource};

    #[test]
    fn region_not_found_writes_nothing() {
        let site = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let page = write_file(site.path(), "about.html", "<div id=\"other\">x</div>");

        let source = MemorySource::new();
        let options = TemplaterOptions::default();
        let converter = PageConverter::new(&source, output.path(), &options);

        let result = converter.write_leaf_template(page.to_str().unwrap(), "content", output.path());

        assert!(matches!(result, Err(TemplaterError::RegionNotFound(_))));
        assert!(list_dir(output.path()).is_empty());
    }

    #[test]
    fn missing_page() {
        let output = tempfile::tempdir().unwrap();
        let missing = output.path().join("missing.html");

        let source = MemorySource::new();
        let options = TemplaterOptions::default();
        let converter = PageConverter::new(&source, output.path(), &options);

        let result = converter.write_base_template(missing.to_str().unwrap(), "content", output.path());

        assert!(matches!(result, Err(TemplaterError::NotFound(_))));
    }

    #[test]
    fn unreachable_page() {
        let output = tempfile::tempdir().unwrap();

        let source = MemorySource::new();
        let options = TemplaterOptions::default();
        let converter = PageConverter::new(&source, output.path(), &options);

        let result = converter.write_rewritten_page("https://down.example.com/", output.path());

        assert!(matches!(result, Err(TemplaterError::Unreachable { .. })));
    }
}

use proceedings_builder::config::Config;
use proceedings_builder::logger;
use proceedings_builder::models::{load_papers, load_user_table, PdfInfo, TextEncoding};
use proceedings_builder::services::bibliography::render_bibliography;
use proceedings_builder::services::pagination::paginate;
use proceedings_builder::services::snapshot::load_snapshot;
use proceedings_builder::services::FixTable;
use proceedings_builder::workflow::{Fixes, MetadataFlow};
use proceedings_builder::App;
use std::path::Path;

const USER_EXPORT: &str = "CMT Users\r\n\r\nFirst\tFirstName\tLastName\tEmail\r\n\tAna Maria\tGarcia\tana@upm.es\r\n\tJohn\tSmith\tjohn@mit.edu\r\n";

const PAPER_EXPORT: &str = "Camera Ready Papers\r\n\r\nID\tTitle\tAbstract\tName (Org)\r\n\
46\tDeep Things\t  We study things.  \tJohn Smith* (MIT)\r\n\
7\tShallow Things\tAbs seven\tJane Doe (UCL); Bob Lee (ETH)\r\n\
283\tInvited Talk\tAbs invited\tAna Maria Garcia (UPM)\r\n\
12\tUmlauts\tAbs twelve\tHans Müller (TUM)\r\n\
13\tNo Umlauts\tAbs thirteen\tEva Muller (KTH)\r\n";

/// 编码为带 BOM 的 UTF-16LE，和 CMT 导出一致
fn utf16le(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

fn write_exports(dir: &Path) -> Config {
    std::fs::write(dir.join("users.txt"), utf16le(USER_EXPORT)).unwrap();
    std::fs::write(dir.join("papers.txt"), utf16le(PAPER_EXPORT)).unwrap();
    std::fs::write(dir.join("title_fixes.txt"), "SMITH14\tDeep Things, Revisited\n").unwrap();

    Config {
        author_file: dir.join("users.txt"),
        paper_file: dir.join("papers.txt"),
        title_fix_file: dir.join("title_fixes.txt"),
        abstract_fix_file: dir.join("missing_abstract_fixes.txt"),
        paper_input_dir: dir.join("original_papers"),
        latex_source_dir: dir.join("latex_sources"),
        paper_output_dir: dir.join("final_proceedings"),
        bib_filename: dir.join("final_proceedings").join("proceedings.bib"),
        abstracts_filename: dir.join("abstracts.tex"),
        snapshot_filename: dir.join("papers.json"),
        output_log_file: dir.join("output.txt"),
        ..Config::default()
    }
}

fn letter_pdf(pages: u32) -> PdfInfo {
    PdfInfo {
        pages,
        page_size: "612 x 792 pts (letter)".to_string(),
        paper_size: Some("letter".to_string()),
        pdf_version: "1.5".to_string(),
    }
}

#[tokio::test]
async fn test_metadata_flow_on_utf16_exports() {
    logger::init();
    let tmp = tempfile::tempdir().unwrap();
    let config = write_exports(tmp.path());

    let users = load_user_table(&config.author_file, TextEncoding::Utf16)
        .await
        .unwrap();
    let papers = load_papers(&config.paper_file, TextEncoding::Utf16)
        .await
        .unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(papers.len(), 5);

    let fixes = Fixes {
        titles: FixTable::load(&config.title_fix_file).await,
        abstracts: FixTable::load(&config.abstract_fix_file).await,
    };
    let papers = MetadataFlow::new(&config, &users)
        .run(papers, &fixes)
        .unwrap();

    // 排序后 Doe < Garcia < Muller < Müller < Smith，再把 283、46 移到最前面
    let order: Vec<(u64, &str)> = papers.iter().map(|p| (p.id, p.bibid_str())).collect();
    assert_eq!(
        order,
        vec![
            (283, "garcia14"),
            (46, "smith14"),
            (7, "doe14"),
            (13, "muller14a"),
            (12, "muller14b"),
        ]
    );

    let garcia = &papers[0];
    assert_eq!(garcia.bibtex_author, "Garcia, Ana Maria");
    assert_eq!(garcia.authors[0].first_name, "Ana Maria");

    let smith = &papers[1];
    assert_eq!(smith.title, "Deep Things, Revisited");
    assert_eq!(smith.abstract_text, "We study things.");
    assert!(smith.authors[0].corresponding);

    assert_eq!(papers[2].linear_author, "Jane Doe, Bob Lee");
}

#[tokio::test]
async fn test_pagination_feeds_bibliography() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_exports(tmp.path());

    let users = load_user_table(&config.author_file, config.export_encoding)
        .await
        .unwrap();
    let papers = load_papers(&config.paper_file, config.export_encoding)
        .await
        .unwrap();
    let mut papers = MetadataFlow::new(&config, &users)
        .run(papers, &Fixes::default())
        .unwrap();

    for (paper, pages) in papers.iter_mut().zip([2, 8, 9, 1, 4]) {
        paper.main_pdf_info = Some(letter_pdf(pages));
    }
    assert_eq!(paginate(&mut papers).unwrap(), 24);

    let pagestrings: Vec<_> = papers
        .iter()
        .map(|p| p.pagestring.clone().unwrap())
        .collect();
    assert_eq!(pagestrings, vec!["1-2", "3-10", "11-19", "20-20", "21-24"]);

    let bib = render_bibliography(&config.bib_preamble, &papers).unwrap();
    assert!(bib.starts_with("@Proceedings{AISTATS-2014,"));
    assert!(bib.contains("@InProceedings{smith14,\n  title = {{Deep Things}},"));
    assert!(bib.contains("  pages = {20-20},"));
    assert_eq!(bib.matches("@InProceedings{").count(), 6);
}

#[tokio::test]
async fn test_unknown_user_aborts_metadata_flow() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_exports(tmp.path());
    std::fs::write(
        &config.paper_file,
        "ID\tTitle\tAbstract\tName (Org)\n1\tT\tA\tJuan Carlos Perez (UAM)\n",
    )
    .unwrap();

    let users = load_user_table(&config.author_file, TextEncoding::Utf16)
        .await
        .unwrap();
    let papers = load_papers(&config.paper_file, TextEncoding::Utf8)
        .await
        .unwrap();

    let err = MetadataFlow::new(&config, &users)
        .run(papers, &Fixes::default())
        .unwrap_err();
    assert!(err.to_string().contains("Juan Carlos Perez"));
}

/// 用 shell 脚本代替 pdfinfo，跳过编译，完整运行一次
#[cfg(unix)]
#[tokio::test]
async fn test_full_run_without_compiling() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let mut config = write_exports(tmp.path());

    let pdfinfo = tmp.path().join("fake_pdfinfo.sh");
    std::fs::write(
        &pdfinfo,
        "#!/bin/sh\nprintf 'Title:          x\\nPages:          3\\nPage size:      612 x 792 pts (letter)\\nPDF version:    1.5\\n'\n",
    )
    .unwrap();
    std::fs::set_permissions(&pdfinfo, std::fs::Permissions::from_mode(0o755)).unwrap();
    config.pdfinfo_program = pdfinfo.to_string_lossy().to_string();
    config.skip_compile = true;

    for id in [7, 12, 13, 46, 283] {
        let dir = config.paper_input_dir.join(format!("Paper {}", id));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}.pdf", id)), b"%PDF-1.5").unwrap();
        std::fs::write(dir.join(".DS_Store"), b"").unwrap();
    }
    let supp_dir = config.paper_input_dir.join("Paper 46");
    std::fs::write(supp_dir.join("appendix.zip"), b"PK").unwrap();

    let app = App::initialize(config.clone()).unwrap();
    let stats = app.run().await.unwrap();

    assert_eq!(stats.papers, 5);
    assert_eq!(stats.total_pages, 15);
    assert_eq!(stats.render.source_only, 5);
    assert_eq!(stats.render.compiled, 0);
    assert_eq!(stats.render.supplements, 1);

    let tex = std::fs::read_to_string(config.latex_source_dir.join("smith14.tex")).unwrap();
    assert!(tex.contains(r"\usepackage[letterpaper]{geometry}"));
    assert!(tex.contains(r"\small 4}"));
    assert!(tex.contains(r"\small 6}"));

    let bib = std::fs::read_to_string(&config.bib_filename).unwrap();
    assert!(bib.contains("@InProceedings{garcia14,"));
    assert!(bib.contains("  pages = {1-3},"));

    let abstracts = std::fs::read_to_string(&config.abstracts_filename).unwrap();
    assert!(abstracts.contains(r"(smith14) \textbf{Deep Things, Revisited}"));

    let snapshot = load_snapshot(&config.snapshot_filename).await.unwrap();
    assert_eq!(snapshot[1].bibid.as_deref(), Some("smith14"));
    assert!(snapshot[1].supp_file.is_some());

    let log = std::fs::read_to_string(&config.output_log_file).unwrap();
    assert!(log.contains("总页数: 15"));
}

#[tokio::test]
#[ignore] // 需要 pdfinfo 和 pdflatex，以及 proceedings.toml 指向的真实数据：cargo test -- --ignored
async fn test_full_run_with_real_tools() {
    logger::init();
    let config = Config::load().expect("加载配置失败");
    let stats = App::initialize(config)
        .expect("初始化失败")
        .run()
        .await
        .expect("运行失败");
    assert!(stats.papers > 0);
}

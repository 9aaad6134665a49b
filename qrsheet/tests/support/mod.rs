#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use qrsheet::{AppState, Config, build_router};
use rust_xlsxwriter::Workbook;

pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

pub use Cell::{Blank, Number, Text};

pub struct FixtureSheet {
    pub name: &'static str,
    pub rows: Vec<Vec<Cell>>,
}

pub fn write_workbook(path: &Path, sheets: &[FixtureSheet]) {
    let mut workbook = Workbook::new();
    for fixture in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(fixture.name).expect("sheet name");
        for (r, row) in fixture.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Cell::Text(s) => {
                        sheet.write_string(r, c, *s).expect("write string");
                    }
                    Cell::Number(n) => {
                        sheet.write_number(r, c, *n).expect("write number");
                    }
                    Cell::Blank => {}
                }
            }
        }
    }
    workbook.save(path).expect("save workbook");
}

pub fn catalog_sheet() -> FixtureSheet {
    FixtureSheet {
        name: "Sheet1",
        rows: vec![
            vec![Text("Stress"), Text("Type"), Text("Operation"), Text("Condition")],
            vec![Text("Thermal"), Text("A"), Text("Op1"), Text("85C")],
            vec![Blank, Text("x"), Text("y"), Text("z")],
            vec![Text("Temp Cycle"), Text("B"), Text("Op2"), Number(500.0)],
            vec![Text("Thermal"), Text("A"), Text("Op3"), Text("125C")],
            vec![Text(" Thermal "), Text("C"), Text("Op4"), Text("150C")],
            vec![Text("   "), Text("w"), Text("w"), Text("w")],
        ],
    }
}

pub fn fields_sheet() -> FixtureSheet {
    FixtureSheet {
        name: "Sheet2",
        rows: vec![
            vec![
                Text("id"),
                Text("Lot"),
                Text("Product"),
                Text("QR"),
                Text("Temp"),
                Text("Version"),
            ],
            vec![
                Number(1.0),
                Text("L1"),
                Text("P"),
                Text("QR-1"),
                Number(85.0),
                Text("v1"),
            ],
        ],
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub workbook: PathBuf,
    pub client: reqwest::Client,
    _dir: tempfile::TempDir,
}

impl TestServer {
    pub async fn start(sheets: &[FixtureSheet]) -> Self {
        Self::start_with(sheets, |_| {}).await
    }

    pub async fn start_with(sheets: &[FixtureSheet], adjust: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let workbook = dir.path().join("QR_V2.xlsx");
        if !sheets.is_empty() {
            write_workbook(&workbook, sheets);
        }

        let mut config = Config::for_workbook(workbook.clone());
        adjust(&mut config);
        let app = build_router(AppState::new(&config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

        Self {
            addr,
            workbook,
            client: reqwest::Client::new(),
            _dir: dir,
        }
    }

    pub async fn standard() -> Self {
        Self::start(&[catalog_sheet(), fields_sheet()]).await
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get_json(&self, path: &str) -> (u16, serde_json::Value) {
        let resp = self.client.get(self.url(path)).send().await.expect("send");
        let status = resp.status().as_u16();
        let body = resp.json().await.expect("json body");
        (status, body)
    }
}

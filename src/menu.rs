// 🖥️ Text menu - the interactive front end
//
// Thin layer over Agency: prompts, validates input, prints results.
// Generic over BufRead/Write so sessions can be scripted in tests.
// EOF at any prompt behaves like the back command; EOF at the main
// menu ends the session.

use crate::agency::Agency;
use crate::config::Config;
use crate::error::QueryError;
use crate::export::export_revenue;
use crate::loader::LoadSummary;
use crate::parser::RecordKind;
use crate::validation::{is_valid_load_path, is_valid_talent_name};
use std::io::{self, BufRead, Write};

// ============================================================================
// MESSAGES
// ============================================================================

pub const MAIN_MENU: &str = "1) Cargar películas\n\
2) Cargar información de ventas\n\
3) Listar colaboraciones directas\n\
4) Listar talentos compatibles\n\
5) Listar talentos incompatibles\n\
6) Exportar talentos con mayor recaudación\n\
7) Salir\n\
>>> ";

pub const INVALID_OPTION: &str = "Seleccione una opción válida";
pub const IMPORT_ERROR: &str = "El/los archivos a importar deben existir y ser CSV válidos";
pub const EXPORT_ERROR: &str = "Error en la exportación";
pub const TALENT_NOT_FOUND: &str = "Talento no existente";
pub const INVALID_TALENT_NAME: &str =
    "El nombre ingresado no debe estar vacío y debe estar compuesto por caracteres alfabéticos";
pub const OK: &str = "OK";

const PROMPT_MOVIES: &str = "Ingrese el archivo de películas a cargar: ";
const PROMPT_SALES: &str = "Ingrese el archivo de ventas a cargar: ";
const PROMPT_TALENT: &str = "Ingrese el nombre de un talento: ";
const PROMPT_EXPORT: &str = "Ingrese la ruta del archivo a guardar: ";

/// Menu options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    LoadMovies,
    LoadSales,
    DirectCollaborators,
    Compatible,
    Incompatible,
    ExportRevenue,
    Exit,
}

impl MenuOption {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(MenuOption::LoadMovies),
            2 => Some(MenuOption::LoadSales),
            3 => Some(MenuOption::DirectCollaborators),
            4 => Some(MenuOption::Compatible),
            5 => Some(MenuOption::Incompatible),
            6 => Some(MenuOption::ExportRevenue),
            7 => Some(MenuOption::Exit),
            _ => None,
        }
    }
}

/// Titles and empty-result messages for one talent query
struct QueryText {
    title: &'static str,
    empty: &'static str,
}

const DIRECT_TEXT: QueryText = QueryText {
    title: "Colaboradores directos:",
    empty: "No existen colaboradores directos para el talento ingresado",
};

const COMPATIBLE_TEXT: QueryText = QueryText {
    title: "Talentos compatibles:",
    empty: "No existen talentos compatibles para el talento ingresado",
};

const INCOMPATIBLE_TEXT: QueryText = QueryText {
    title: "Talentos incompatibles:",
    empty: "No existen talentos incompatibles para el talento ingresado",
};

/// Print the ignored names of a load followed by `OK <count>`
pub fn report_load<W: Write>(out: &mut W, summary: &LoadSummary) -> io::Result<()> {
    let notice = match summary.kind {
        RecordKind::Movies => "Ignorando película duplicada:",
        RecordKind::Sales => "Ignorando película inexistente:",
    };

    for name in &summary.ignored {
        writeln!(out, "{} {}", notice, name)?;
    }
    writeln!(out, "{} {}", OK, summary.accepted)
}

/// Print a title and a 1-based numbered list
pub fn print_list<W: Write>(out: &mut W, title: &str, items: &[String]) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    for (idx, item) in items.iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, item)?;
    }
    Ok(())
}

// ============================================================================
// MENU
// ============================================================================

pub struct Menu<R, W> {
    input: R,
    output: W,
    back_command: String,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, config: &Config) -> Self {
        Menu {
            input,
            output,
            back_command: config.back_command.clone(),
        }
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self, agency: &mut Agency) -> io::Result<()> {
        loop {
            let Some(choice) = self.prompt(MAIN_MENU)? else {
                return Ok(());
            };

            if choice == self.back_command {
                writeln!(self.output, "{}", INVALID_OPTION)?;
                continue;
            }

            let option = choice.trim().parse::<i64>().ok().and_then(MenuOption::from_number);

            match option {
                Some(MenuOption::LoadMovies) => self.load(agency, RecordKind::Movies)?,
                Some(MenuOption::LoadSales) => self.load(agency, RecordKind::Sales)?,
                Some(MenuOption::DirectCollaborators) => {
                    self.query(agency, Agency::direct_collaborators, &DIRECT_TEXT)?
                }
                Some(MenuOption::Compatible) => {
                    self.query(agency, Agency::compatible, &COMPATIBLE_TEXT)?
                }
                Some(MenuOption::Incompatible) => {
                    self.query(agency, Agency::incompatible, &INCOMPATIBLE_TEXT)?
                }
                Some(MenuOption::ExportRevenue) => self.export(agency)?,
                Some(MenuOption::Exit) => return Ok(()),
                None => writeln!(self.output, "{}", INVALID_OPTION)?,
            }
        }
    }

    /// Write a prompt and read one line; None on EOF
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let line = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some(line))
    }

    /// Prompt that also maps the back command to None
    fn prompt_or_back(&mut self, text: &str) -> io::Result<Option<String>> {
        Ok(self
            .prompt(text)?
            .filter(|line| *line != self.back_command))
    }

    fn load(&mut self, agency: &mut Agency, kind: RecordKind) -> io::Result<()> {
        let text = match kind {
            RecordKind::Movies => PROMPT_MOVIES,
            RecordKind::Sales => PROMPT_SALES,
        };

        loop {
            let Some(line) = self.prompt_or_back(text)? else {
                return Ok(());
            };

            // Paths are separated by single spaces; one bad path rejects all
            let paths: Vec<&str> = line.split(' ').collect();
            if !paths
                .iter()
                .all(|path| is_valid_load_path(path, agency.extension()))
            {
                writeln!(self.output, "{}", IMPORT_ERROR)?;
                continue;
            }

            let summary = match kind {
                RecordKind::Movies => agency.load_movies(&paths),
                RecordKind::Sales => agency.load_sales(&paths),
            };
            return report_load(&mut self.output, &summary);
        }
    }

    /// Ask for a valid talent name; None when the user goes back
    fn ask_talent(&mut self) -> io::Result<Option<String>> {
        loop {
            let Some(name) = self.prompt_or_back(PROMPT_TALENT)? else {
                return Ok(None);
            };

            if is_valid_talent_name(&name) {
                return Ok(Some(name));
            }
            writeln!(self.output, "{}", INVALID_TALENT_NAME)?;
        }
    }

    fn query<F>(&mut self, agency: &Agency, run_query: F, text: &QueryText) -> io::Result<()>
    where
        F: Fn(&Agency, &str) -> Result<Vec<String>, QueryError>,
    {
        loop {
            let Some(name) = self.ask_talent()? else {
                return Ok(());
            };

            match run_query(agency, &name) {
                Err(QueryError::TalentNotFound(_)) => {
                    writeln!(self.output, "{}", TALENT_NOT_FOUND)?;
                }
                Ok(talents) if talents.is_empty() => {
                    return writeln!(self.output, "{}", text.empty);
                }
                Ok(talents) => {
                    return print_list(&mut self.output, text.title, &talents);
                }
            }
        }
    }

    fn export(&mut self, agency: &Agency) -> io::Result<()> {
        loop {
            let Some(destination) = self.prompt_or_back(PROMPT_EXPORT)? else {
                return Ok(());
            };

            match export_revenue(agency, &destination) {
                Ok(_) => return writeln!(self.output, "{}", OK),
                Err(_) => writeln!(self.output, "{}", EXPORT_ERROR)?,
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

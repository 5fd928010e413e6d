//! Interactive field prompts for the CLI
//!
//! Generic over the input/output pair so the flows can be driven from tests.

use std::io::{BufRead, Write};
use crate::fields::{self, FieldValue, FRAME_FIELDS, SEARCH_FIELDS};
use crate::frame::{MATERIAL_CHOICES, NewFrame};
use crate::query::SearchCriteria;
use crate::{Error, Result};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line to the prompt output
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Show `label: ` and read one trimmed line. `None` once input is exhausted.
    fn read_line(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask for raw text. Required questions are repeated until answered.
    pub fn ask(&mut self, label: &str, required: bool) -> Result<String> {
        let label = if required { format!("{} *", label) } else { label.to_string() };
        loop {
            match self.read_line(&label)? {
                Some(answer) if !answer.is_empty() => return Ok(answer),
                Some(_) if required => self.say("This field is required.")?,
                Some(_) => return Ok(String::new()),
                None if required => {
                    return Err(Error::Io(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        format!("input ended before '{}' was answered", label),
                    )));
                }
                None => return Ok(String::new()),
            }
        }
    }

    /// Ask for a typed field, repeating the question on invalid values
    fn ask_value(
        &mut self,
        def: &fields::FieldDef,
        label: &str,
        non_negative: bool,
    ) -> Result<Option<FieldValue>> {
        loop {
            let raw = self.ask(label, false)?;
            match def.kind.parse(def.name, &raw) {
                Ok(Some(FieldValue::Integer(n))) if non_negative && n < 0 => {
                    self.say(&format!("Invalid value: {} must not be negative", def.name))?;
                }
                Ok(Some(FieldValue::Decimal(v))) if non_negative && v < 0.0 => {
                    self.say(&format!("Invalid value: {} must not be negative", def.name))?;
                }
                Ok(value) => return Ok(value),
                Err(Error::Validation(msg)) => self.say(&format!("Invalid value: {}", msg))?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Collect a new frame field by field. Blank answers skip optional fields.
    pub fn prompt_new_frame(&mut self) -> Result<NewFrame> {
        self.say("Enter frame data (leave blank to skip / use defaults).")?;
        let mut frame = NewFrame::default();

        let brand = self.ask("Brand (can be blank)", false)?;
        fields::apply_frame_field(&mut frame, "brand", text_value(brand))?;

        let model = self.ask("Model code", true)?;
        fields::apply_frame_field(&mut frame, "model_code", text_value(model))?;

        let material_label = format!("Material [{}] (blank = unknown)", MATERIAL_CHOICES.join(", "));
        let questions: [(&str, String); 10] = [
            ("material", material_label),
            ("lens_width", "Lens width (mm)".to_string()),
            ("bridge_size", "Bridge size (mm)".to_string()),
            ("temple_length", "Temple length (mm)".to_string()),
            ("color", "Color".to_string()),
            ("shape", "Shape (e.g., round, square)".to_string()),
            ("gender", "Gender (men/women/unisex/child)".to_string()),
            ("price", "Price".to_string()),
            ("stock", "Stock quantity (default 0)".to_string()),
            ("notes", "Notes".to_string()),
        ];
        for (name, label) in questions {
            let Some(def) = fields::lookup(FRAME_FIELDS, name) else {
                continue;
            };
            let value = self.ask_value(def, &label, true)?;
            fields::apply_frame_field(&mut frame, name, value)?;
        }

        frame.validate()?;
        Ok(frame)
    }

    /// Collect search criteria. Blank answers leave a criterion unset.
    pub fn prompt_criteria(&mut self) -> Result<SearchCriteria> {
        self.say("Enter search filters (blank to skip). Text filters match partially, ignoring case.")?;
        let mut criteria = SearchCriteria::default();
        for def in SEARCH_FIELDS {
            let value = self.ask_value(def, def.name, false)?;
            fields::apply_search_field(&mut criteria, def.name, value)?;
        }
        Ok(criteria)
    }
}

fn text_value(raw: String) -> Option<FieldValue> {
    (!raw.is_empty()).then_some(FieldValue::Text(raw))
}

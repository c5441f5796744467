use clap::{Args, Parser, Subcommand, ValueEnum};
use jclass_flags::{
    AccessFlagValidator, ConstructKind, Modifier, ModifierSet, ValidationOptions,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "jclass", about = "Decode and check JVM class file access flags")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the modifiers an access flag word names
    Decode {
        /// Flag word: decimal, 0x hex, 0b binary or names like public|static
        #[arg(value_parser = parse_word)]
        word: u16,
        /// Structure the word was read from
        #[arg(short, long, value_enum)]
        kind: Kind,
    },
    /// Decode an access flag word and validate it
    Check {
        /// Flag word: decimal, 0x hex, 0b binary or names like public|static
        #[arg(value_parser = parse_word)]
        word: u16,
        /// Structure the word was read from
        #[arg(short, long, value_enum)]
        kind: Kind,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// List the flag masks of one or all construct kinds
    Table {
        #[arg(short, long, value_enum)]
        kind: Option<Kind>,
    },
    /// List the legality rules for a construct kind, in evaluation order
    Rules {
        #[arg(short, long, value_enum)]
        kind: Kind,
        #[command(flatten)]
        context: ContextArgs,
    },
}

#[derive(Args)]
struct ContextArgs {
    /// The field or method is declared in an interface
    #[arg(long)]
    interface_member: bool,
    /// Major version of the enclosing class file
    #[arg(long)]
    major_version: Option<u16>,
}

impl ContextArgs {
    fn options(&self) -> ValidationOptions {
        ValidationOptions {
            interface_member: self.interface_member,
            major_version: self.major_version,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Yaml,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Class,
    Field,
    Method,
    InnerClass,
}

impl From<Kind> for ConstructKind {
    fn from(k: Kind) -> Self {
        match k {
            Kind::Class => ConstructKind::Class,
            Kind::Field => ConstructKind::Field,
            Kind::Method => ConstructKind::Method,
            Kind::InnerClass => ConstructKind::InnerClass,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { word, kind } => cmd_decode(cli.format, word, kind.into()),
        Commands::Check {
            word,
            kind,
            context,
        } => cmd_check(cli.format, word, kind.into(), context.options()),
        Commands::Table { kind } => cmd_table(cli.format, kind.map(Into::into)),
        Commands::Rules { kind, context } => {
            cmd_rules(cli.format, kind.into(), context.options())
        }
    }
}

/// Parse a flag word written as decimal, `0x` hex, `0b` binary or as
/// `|`-separated modifier names (`public|static`, `ACC_FINAL`).
fn parse_word(s: &str) -> Result<u16, String> {
    let s = s.trim();
    if !s.starts_with(|c: char| c.is_ascii_digit()) {
        return parse_names(s);
    }
    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or(s.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b").or(s.strip_prefix("0B")) {
        (bin, 2)
    } else {
        (s, 10)
    };
    // from_str_radix takes a leading sign
    if digits.starts_with(|c: char| c == '+' || c == '-') {
        return Err(format!("invalid flag word `{s}`: sign not allowed"));
    }
    let digits = digits.replace('_', "");
    u16::from_str_radix(&digits, radix).map_err(|e| format!("invalid flag word `{s}`: {e}"))
}

fn parse_names(s: &str) -> Result<u16, String> {
    if s.is_empty() {
        return Err("empty flag word".to_string());
    }
    s.split('|').map(str::trim).try_fold(0u16, |acc, name| {
        Modifier::from_name(name)
            .map(|m| acc | m.mask())
            .ok_or_else(|| format!("invalid flag word `{s}`: unknown modifier `{name}`"))
    })
}

fn hex(v: u16) -> String {
    format!("{v:#06x}")
}

fn print_yaml<T: Serialize>(value: &T) {
    match serde_yaml::to_string(value) {
        Ok(s) => print!("{s}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

// === decode / check ===

#[derive(Serialize)]
struct DecodeReport {
    kind: ConstructKind,
    raw: String,
    modifiers: Vec<Modifier>,
    unknown_bits: String,
}

impl From<ModifierSet> for DecodeReport {
    fn from(set: ModifierSet) -> Self {
        Self {
            kind: set.kind(),
            raw: hex(set.encode()),
            modifiers: set.modifiers().collect(),
            unknown_bits: hex(set.unknown_bits()),
        }
    }
}

#[derive(Serialize)]
struct CheckReport {
    #[serde(flatten)]
    decoded: DecodeReport,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CheckReport {
    fn new(set: ModifierSet, result: &jclass_flags::Result<ModifierSet>) -> Self {
        Self {
            decoded: set.into(),
            valid: result.is_ok(),
            error: result.as_ref().err().map(ToString::to_string),
        }
    }
}

fn print_set(set: &ModifierSet) {
    println!("Kind:          {}", set.kind());
    println!("Raw:           {:#06x}", set.encode());
    let names: Vec<&str> = set.modifiers().map(Modifier::name).collect();
    if names.is_empty() {
        println!("Modifiers:     (none)");
    } else {
        println!("Modifiers:     {}", names.join(" "));
    }
    if set.unknown_bits() != 0 {
        println!("Unknown bits:  {:#06x}", set.unknown_bits());
    }
}

fn cmd_decode(format: Format, word: u16, kind: ConstructKind) {
    let set = AccessFlagValidator::new().decode(word, kind);
    match format {
        Format::Text => print_set(&set),
        Format::Yaml => print_yaml(&DecodeReport::from(set)),
    }
}

fn cmd_check(format: Format, word: u16, kind: ConstructKind, options: ValidationOptions) {
    log::debug!("checking {word:#06x} as {kind} with {options:?}");
    let validator = AccessFlagValidator::with_options(options);
    let set = validator.decode(word, kind);
    let result = validator.validate(set, kind);

    // YAML carries the error in the report itself
    match format {
        Format::Text => {
            print_set(&set);
            match &result {
                Ok(_) => println!("Valid:         yes"),
                Err(e) => eprintln!("Error: {e}"),
            }
        }
        Format::Yaml => print_yaml(&CheckReport::new(set, &result)),
    }

    if result.is_err() {
        std::process::exit(1);
    }
}

// === table / rules ===

#[derive(Serialize)]
struct MaskEntry {
    kind: ConstructKind,
    modifier: Modifier,
    mask: String,
}

fn cmd_table(format: Format, kind: Option<ConstructKind>) {
    let kinds = match kind {
        Some(k) => vec![k],
        None => ConstructKind::ALL.to_vec(),
    };

    match format {
        Format::Text => {
            for (i, k) in kinds.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("=== {k} ({:#06x}) ===", k.known_bits());
                for mask in k.flag_masks() {
                    println!("  {mask}");
                }
            }
        }
        Format::Yaml => print_yaml(&mask_entries(&kinds)),
    }
}

fn mask_entries(kinds: &[ConstructKind]) -> Vec<MaskEntry> {
    kinds
        .iter()
        .flat_map(|&k| {
            k.flag_masks().iter().map(move |m| MaskEntry {
                kind: k,
                modifier: m.modifier,
                mask: hex(m.mask),
            })
        })
        .collect()
}

#[derive(Serialize)]
struct RuleEntry {
    kind: ConstructKind,
    index: usize,
    rule: String,
}

fn cmd_rules(format: Format, kind: ConstructKind, options: ValidationOptions) {
    let validator = AccessFlagValidator::with_options(options);
    match format {
        Format::Text => {
            for (i, rule) in validator.rules(kind).enumerate() {
                println!("{i:>3}  {rule}");
            }
        }
        Format::Yaml => print_yaml(&rule_entries(validator, kind)),
    }
}

fn rule_entries(validator: AccessFlagValidator, kind: ConstructKind) -> Vec<RuleEntry> {
    validator
        .rules(kind)
        .enumerate()
        .map(|(index, rule)| RuleEntry {
            kind,
            index,
            rule: rule.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_word_radixes() {
        assert_eq!(parse_word("33"), Ok(0x21));
        assert_eq!(parse_word("0x0021"), Ok(0x21));
        assert_eq!(parse_word("0X8000"), Ok(0x8000));
        assert_eq!(parse_word("0b0010_0001"), Ok(0x21));
        assert_eq!(parse_word(" 0xffff "), Ok(0xffff));
    }

    #[test]
    fn parse_word_names() {
        assert_eq!(parse_word("public|static"), Ok(0x0009));
        assert_eq!(parse_word("ACC_PUBLIC | ACC_FINAL"), Ok(0x0011));
        assert_eq!(parse_word("abstract|strictfp"), Ok(0x0c00));
        assert!(parse_word("public|module").is_err());
        assert!(parse_word("public|").is_err());
    }

    #[test]
    fn parse_word_rejects_out_of_range() {
        assert!(parse_word("65536").is_err());
        assert!(parse_word("0x10000").is_err());
        assert!(parse_word("").is_err());
        assert!(parse_word("0x").is_err());
        assert!(parse_word("+33").is_err());
        assert!(parse_word("-0").is_err());
        assert!(parse_word("0x+21").is_err());
        assert!(parse_word("0b+1").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn major_version_stands_alone() {
        let parsed = Cli::try_parse_from([
            "jclass", "check", "0x0c01", "--kind", "method", "--major-version", "61",
        ]);
        assert!(parsed.is_ok());

        let parsed = Cli::try_parse_from([
            "jclass",
            "check",
            "0x0401",
            "--kind",
            "method",
            "--interface-member",
            "--major-version",
            "51",
        ]);
        assert!(parsed.is_ok());
    }

    #[test]
    fn decode_report_fields() {
        let report = DecodeReport::from(ModifierSet::decode(0x8009, ConstructKind::Method));
        assert_eq!(report.raw, "0x8009");
        assert_eq!(report.modifiers, vec![Modifier::Public, Modifier::Static]);
        assert_eq!(report.unknown_bits, "0x8000");
    }

    #[test]
    fn check_report_for_rejected_word() {
        let validator = AccessFlagValidator::new();
        let set = validator.decode(0x0003, ConstructKind::Field);
        let report = CheckReport::new(set, &validator.validate(set, ConstructKind::Field));
        assert!(!report.valid);
        assert_eq!(
            report.error.as_deref(),
            Some("conflicting modifiers on field: PUBLIC|PRIVATE")
        );

        let yaml = serde_yaml::to_string(&report).unwrap();
        assert!(yaml.contains("valid: false"));
        assert!(yaml.contains("conflicting modifiers on field"));
    }

    #[test]
    fn check_report_for_accepted_word() {
        let validator = AccessFlagValidator::new();
        let set = validator.decode(0x0009, ConstructKind::Method);
        let report = CheckReport::new(set, &validator.validate(set, ConstructKind::Method));
        assert!(report.valid);
        assert_eq!(report.error, None);
        assert!(!serde_yaml::to_string(&report).unwrap().contains("error:"));
    }

    #[test]
    fn mask_entries_follow_table_order() {
        let entries = mask_entries(&[ConstructKind::Field]);
        assert_eq!(entries.len(), ConstructKind::Field.flag_masks().len());
        assert_eq!(entries[0].modifier, Modifier::Public);
        assert_eq!(entries[0].mask, "0x0001");
        assert!(entries.iter().all(|e| e.kind == ConstructKind::Field));

        let all = mask_entries(&ConstructKind::ALL);
        let total: usize = ConstructKind::ALL.iter().map(|k| k.flag_masks().len()).sum();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn rule_entries_follow_options() {
        let rules = |options| -> Vec<String> {
            rule_entries(AccessFlagValidator::with_options(options), ConstructKind::Method)
                .into_iter()
                .map(|e| e.rule)
                .collect()
        };

        let default = rules(ValidationOptions::default());
        assert_eq!(
            default,
            vec![
                "no flags of other construct kinds",
                "at most one of PUBLIC|PRIVATE|PROTECTED",
                "ABSTRACT forbids PRIVATE|STATIC|FINAL|SYNCHRONIZED|NATIVE|STRICT",
            ]
        );

        let java17 = rules(ValidationOptions::default().with_major_version(61));
        assert_eq!(
            java17[2],
            "ABSTRACT forbids PRIVATE|STATIC|FINAL|SYNCHRONIZED|NATIVE"
        );

        let interface = rules(ValidationOptions::default().in_interface());
        assert_eq!(interface.len(), 5);
        assert_eq!(interface[3], "at least one of PUBLIC|PRIVATE");

        let entries = rule_entries(AccessFlagValidator::new(), ConstructKind::Method);
        assert_eq!(
            entries.iter().map(|e| e.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }
}

use crate::config::toml_config::FitcheckConfig;
use crate::core::filter::ItemFilter;
use crate::domain::model::{
    OutfitRequest, TagRecord, CASUAL, FORMALITIES, GENDERS, INDOOR, LOCATIONS, UNISEX,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_one_of;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "fitcheck")]
#[command(about = "Recommend an outfit from a tagged clothing inventory")]
pub struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Closet directory holding one JSON record per item (overrides config)
    #[arg(long)]
    pub closet: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Pick one item per required slot
    Recommend {
        /// Indoor or Outdoor
        #[arg(long)]
        location: Option<String>,

        /// Formal or Casual
        #[arg(long)]
        formality: Option<String>,

        /// Men's, Women's or Unisex
        #[arg(long)]
        gender: Option<String>,

        /// Preferred base color
        #[arg(long)]
        color: Option<String>,

        /// Seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,

        /// Print the outfit as JSON
        #[arg(long)]
        json: bool,
    },

    /// List catalog items matching the given attributes, or add a tagged item
    #[command(args_conflicts_with_subcommands = true)]
    Inventory {
        #[command(subcommand)]
        action: Option<InventoryAction>,

        #[arg(long)]
        item_type: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        formality: Option<String>,

        #[arg(long)]
        gender: Option<String>,
    },

    /// Parse a saved outfit critique into style, rating and comment
    Critique {
        /// File holding the critique text
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum InventoryAction {
    /// Store a tagger record in the closet
    Add {
        /// JSON file produced by the tagger
        tag: PathBuf,

        /// Record file name without extension; defaults to the tagged image's name
        #[arg(long)]
        stem: Option<String>,

        /// Replace an existing record with the same name
        #[arg(long)]
        force: bool,
    },
}

impl Args {
    /// 套用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut FitcheckConfig) {
        if let Some(closet) = &self.closet {
            config.closet.path = closet.clone();
        }
        if self.verbose {
            config.logging.get_or_insert_with(Default::default).verbose = Some(true);
        }
        if self.json_logs {
            config.logging.get_or_insert_with(Default::default).format = Some("json".to_string());
        }
    }
}

/// Builds a validated request, falling back to `[defaults]` and then to
/// Indoor / Casual / Unisex.
pub fn build_request(
    config: &FitcheckConfig,
    location: Option<String>,
    formality: Option<String>,
    gender: Option<String>,
    color: Option<String>,
) -> Result<OutfitRequest> {
    let defaults = config.defaults();
    let location = location
        .or(defaults.location)
        .unwrap_or_else(|| INDOOR.to_string());
    let formality = formality
        .or(defaults.formality)
        .unwrap_or_else(|| CASUAL.to_string());
    let gender = gender
        .or(defaults.gender)
        .unwrap_or_else(|| UNISEX.to_string());

    validate_one_of("location", &location, &LOCATIONS)?;
    validate_one_of("formality", &formality, &FORMALITIES)?;
    validate_one_of("gender", &gender, &GENDERS)?;

    Ok(OutfitRequest::new(location, formality, gender).with_base_color(color.or(defaults.color)))
}

/// Turns optional CLI attributes into an item filter; blank values are ignored.
/// Item type and color are lower-cased to match the catalog's canonical form.
pub fn build_filter(
    item_type: Option<String>,
    color: Option<String>,
    location: Option<String>,
    formality: Option<String>,
    gender: Option<String>,
) -> ItemFilter {
    let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    ItemFilter {
        item_type: present(item_type).map(|v| v.to_lowercase()),
        color: present(color).map(|v| v.to_lowercase()),
        location: present(location),
        formality: present(formality),
        gender: present(gender),
    }
}

/// Picks the record name for a tagged item: an explicit stem, then the
/// tagged image's file stem, then the tag file's own stem.
pub fn record_stem(record: &TagRecord, tag_file: &Path, explicit: Option<String>) -> String {
    let file_stem = |path: &Path| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.trim().is_empty())
    };

    explicit
        .filter(|stem| !stem.trim().is_empty())
        .or_else(|| file_stem(Path::new(&record.path)))
        .or_else(|| file_stem(tag_file))
        .unwrap_or_else(|| "item".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FitError;
    use crate::utils::logger::LogFormat;

    #[test]
    fn test_parse_recommend_command() {
        let args = Args::parse_from([
            "fitcheck",
            "--closet",
            "/tmp/closet",
            "recommend",
            "--location",
            "Outdoor",
            "--gender",
            "Men's",
            "--seed",
            "3",
        ]);

        match &args.command {
            Command::Recommend {
                location,
                gender,
                seed,
                json,
                ..
            } => {
                assert_eq!(location.as_deref(), Some("Outdoor"));
                assert_eq!(gender.as_deref(), Some("Men's"));
                assert_eq!(*seed, Some(3));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let mut config = FitcheckConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.closet.path, "/tmp/closet");
    }

    #[test]
    fn test_json_logs_override() {
        let args = Args::parse_from(["fitcheck", "--json-logs", "critique", "out.txt"]);
        let mut config = FitcheckConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn test_build_request_falls_back_to_config_defaults() {
        let config = FitcheckConfig::from_toml_str(
            "[defaults]\nformality = \"Formal\"\ngender = \"Women's\"\ncolor = \"gold\"\n",
        )
        .unwrap();

        let request = build_request(&config, Some("Outdoor".into()), None, None, None).unwrap();
        assert_eq!(request.location, "Outdoor");
        assert_eq!(request.formality, "Formal");
        assert_eq!(request.gender, "Women's");
        assert_eq!(request.base_color.as_deref(), Some("gold"));
    }

    #[test]
    fn test_build_request_rejects_unknown_location() {
        let config = FitcheckConfig::default();
        let err = build_request(&config, Some("Beach".into()), None, None, None).unwrap_err();
        assert!(matches!(err, FitError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_blank_color_means_no_base_color() {
        let config = FitcheckConfig::default();
        let request = build_request(&config, None, None, None, Some(String::new())).unwrap();
        assert_eq!(request.location, "Indoor");
        assert_eq!(request.formality, "Casual");
        assert_eq!(request.gender, "Unisex");
        assert!(request.base_color.is_none());
    }

    #[test]
    fn test_parse_inventory_add() {
        let args = Args::parse_from(["fitcheck", "inventory", "add", "tag.json", "--force"]);
        match args.command {
            Command::Inventory {
                action: Some(InventoryAction::Add { tag, stem, force }),
                ..
            } => {
                assert_eq!(tag, PathBuf::from("tag.json"));
                assert!(stem.is_none());
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let args = Args::parse_from(["fitcheck", "inventory", "--item-type", "hats"]);
        assert!(matches!(
            args.command,
            Command::Inventory { action: None, item_type: Some(_), .. }
        ));
    }

    #[test]
    fn test_record_stem_prefers_image_name() {
        let record = TagRecord::parse(
            "tag.json",
            r#"{"item_type": "Shoes", "color": "Brown", "indoor_outdoor": "Outdoor",
                "formality": "Casual", "gender": "Unisex", "path": "uploads/boots.jpg"}"#,
        )
        .unwrap();
        let tag_file = Path::new("/tmp/out/tag.json");

        assert_eq!(record_stem(&record, tag_file, Some("hiking".into())), "hiking");
        assert_eq!(record_stem(&record, tag_file, Some(" ".into())), "boots");

        let untitled = TagRecord {
            path: String::new(),
            ..record
        };
        assert_eq!(record_stem(&untitled, tag_file, None), "tag");
    }

    #[test]
    fn test_build_filter_canonicalises() {
        let filter = build_filter(
            Some("Shirts".into()),
            Some("".into()),
            None,
            None,
            Some("Men's".into()),
        );
        assert_eq!(filter.item_type.as_deref(), Some("shirts"));
        assert!(filter.color.is_none());
        assert_eq!(filter.gender.as_deref(), Some("Men's"));
    }
}

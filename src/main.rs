use clap::Parser;
use fitcheck::config::cli::{
    build_filter, build_request, record_stem, Args, Command, InventoryAction,
};
use fitcheck::utils::error::{ErrorSeverity, FitError};
use fitcheck::utils::{logger, validation::Validate};
use fitcheck::{
    CritiqueReport, DirectoryCatalog, FitcheckConfig, Outfit, OutfitEngine, OutfitRecommender,
    TagRecord,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match FitcheckConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => FitcheckConfig::default(),
    };
    args.apply_overrides(&mut config);

    // 初始化日誌
    logger::init_cli_logger(config.verbose(), config.log_format());
    tracing::debug!("Config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(args.command, &config) {
        tracing::error!(
            "❌ fitcheck failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(command: Command, config: &FitcheckConfig) -> Result<(), FitError> {
    match command {
        Command::Recommend {
            location,
            formality,
            gender,
            color,
            seed,
            json,
        } => {
            let request = build_request(config, location, formality, gender, color)?;
            let engine = open_engine(config)?;

            if engine.catalog().is_empty() {
                let message = "Your closet is empty! Add some clothing items first.";
                if json {
                    // 空衣櫃仍輸出合法 JSON
                    eprintln!("{}", message);
                    println!("{}", serde_json::to_string_pretty(&Outfit::new())?);
                } else {
                    println!("{}", message);
                }
                return Ok(());
            }

            let outfit = match seed.or_else(|| config.seed()) {
                Some(seed) => engine.recommend_with_rng(&request, &mut StdRng::seed_from_u64(seed)),
                None => engine.recommend(&request),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&outfit)?);
            } else {
                display_outfit(&outfit);
            }
        }
        Command::Inventory {
            action: Some(InventoryAction::Add { tag, stem, force }),
            ..
        } => {
            let content = std::fs::read_to_string(&tag)?;
            let record = TagRecord::parse(&tag.display().to_string(), &content)?;
            let stem = record_stem(&record, &tag, stem);

            let source = DirectoryCatalog::from_settings(config);
            let path = if force {
                source.overwrite(&record, &stem)?
            } else {
                source.add(&record, &stem)?
            };
            println!("✅ Metadata saved to {}", path.display());
        }
        Command::Inventory {
            action: None,
            item_type,
            color,
            location,
            formality,
            gender,
        } => {
            let filter = build_filter(item_type, color, location, formality, gender);
            let engine = open_engine(config)?;
            let items = engine.inventory(&filter);

            println!("👕 {} matching items", items.len());
            for item in items {
                println!(
                    "  {} | {} | {} | {}",
                    item, item.location, item.formality, item.gender
                );
            }
        }
        Command::Critique { file } => {
            let text = std::fs::read_to_string(&file)?;
            let report = CritiqueReport::parse(&text)?;

            println!("Style: {}", report.style);
            println!("Rating: {}/100", report.rating);
            println!("Comment: {}", report.comment);
        }
    }

    Ok(())
}

fn open_engine(config: &FitcheckConfig) -> Result<OutfitEngine<DirectoryCatalog>, FitError> {
    let source = DirectoryCatalog::from_settings(config);
    let recommender = OutfitRecommender::new(config.color_table());
    let (engine, report) = OutfitEngine::open(source, recommender)?;

    for warning in &report.warnings {
        eprintln!("⚠️ {}", warning);
        eprintln!("💡 {}", warning.clone().into_error().recovery_suggestion());
    }
    Ok(engine)
}

fn display_outfit(outfit: &Outfit) {
    if outfit.is_empty() {
        println!("No matching outfit found. Try different criteria or add more clothing items.");
        return;
    }

    println!("Recommended Outfit");
    for (slot, item) in outfit.iter() {
        println!("  {:<10} {}", slot, item.name);
        println!("  {:<10} Color: {}, Type: {}", "", item.color, item.formality);
        if !item.image_path.is_empty() {
            println!("  {:<10} Image: {}", "", item.image_path);
        }
    }
}

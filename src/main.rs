use std::env;

use log::debug;

use brokebuthungry::flows::{map_markers, maps_search_uri, render_text};
use brokebuthungry::{
    AuthState, BrokeButHungry, Coordinates, FixedLocation, LoginForm, Lookup, MapMarker,
    NearbyPlaces, RecipeDetail, RegistrationForm, ResetPasswordForm,
};

const USAGE: &str = "Usage:
  brokebuthungry login <username> <password>
  brokebuthungry register <first> <last> <username> <email> <password> <confirm>
  brokebuthungry reset-password <first> <last> <username> <email> <password> <confirm>
  brokebuthungry favorites <username>
  brokebuthungry search <query...>
  brokebuthungry recipe <id>
  brokebuthungry nearby <lat> <lng>";

#[derive(Debug)]
enum Command {
    Login(LoginForm),
    Register(RegistrationForm),
    ResetPassword(ResetPasswordForm),
    Favorites(String),
    Search(String),
    Recipe(String),
    Nearby(Coordinates),
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let (command, rest) = args.split_first().ok_or_else(|| USAGE.to_string())?;
    let arg = |i: usize| rest.get(i).cloned().ok_or_else(|| USAGE.to_string());

    match command.as_str() {
        "login" => Ok(Command::Login(LoginForm {
            username: arg(0)?,
            password: arg(1)?,
        })),
        "register" => Ok(Command::Register(RegistrationForm {
            first_name: arg(0)?,
            last_name: arg(1)?,
            username: arg(2)?,
            email: arg(3)?,
            password: arg(4)?,
            confirm_password: arg(5)?,
        })),
        "reset-password" => Ok(Command::ResetPassword(ResetPasswordForm {
            first_name: arg(0)?,
            last_name: arg(1)?,
            username: arg(2)?,
            email: arg(3)?,
            password: arg(4)?,
            confirm_password: arg(5)?,
        })),
        "favorites" => Ok(Command::Favorites(arg(0)?)),
        "search" => Ok(Command::Search(rest.join(" "))),
        "recipe" => Ok(Command::Recipe(arg(0)?)),
        "nearby" => {
            let coordinate = |i: usize| -> Result<f64, String> {
                arg(i)?
                    .parse()
                    .map_err(|_| format!("Invalid coordinate: {}", rest[i]))
            };
            Ok(Command::Nearby(Coordinates::new(coordinate(0)?, coordinate(1)?)))
        }
        other => Err(format!("Unknown command: {}\n\n{}", other, USAGE)),
    }
}

fn print_auth(state: AuthState) -> Result<(), Box<dyn std::error::Error>> {
    match state {
        AuthState::Succeeded { message } => {
            println!("{}", message);
            Ok(())
        }
        AuthState::Failed(failure) => match failure.field() {
            Some(field) => Err(format!("{} ({})", failure.message(), field).into()),
            None => Err(failure.message().into()),
        },
        other => Err(format!("Unexpected auth state: {:?}", other).into()),
    }
}

/// One `lat,lng label` line per marker, origin first
fn format_markers(markers: &[MapMarker]) -> String {
    markers
        .iter()
        .map(|marker| {
            format!(
                "{},{} {}\n",
                marker.position.latitude, marker.position.longitude, marker.label
            )
        })
        .collect()
}

fn print_detail(detail: &RecipeDetail) {
    match &detail.info {
        Lookup::Found(info) => {
            println!("{}", info.title);
            println!("{}\n", info.image_url);
            println!("Ingredients ({}):", info.total_ingredients());
            for ingredient in &info.ingredients {
                println!("  - {}", ingredient);
            }
            println!("\nInstructions:");
            for step in &info.instructions {
                println!("  {}", step);
            }
        }
        Lookup::NotFound => println!("Recipe {} not found", detail.id),
        Lookup::Failed(reason) => println!("Recipe unavailable: {}", reason),
    }

    match &detail.nutrition_label {
        Lookup::Found(label) => println!("\nNutrition:\n{}", label.plain_text()),
        Lookup::NotFound => println!("\nNo nutrition label"),
        Lookup::Failed(reason) => println!("\nNutrition unavailable: {}", reason),
    }

    match &detail.price_breakdown {
        Lookup::Found(image) => println!(
            "\nPrice breakdown: {} ({} bytes)",
            image.content_type,
            image.bytes.len()
        ),
        Lookup::NotFound => println!("\nNo price breakdown"),
        Lookup::Failed(reason) => println!("\nPrice breakdown unavailable: {}", reason),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = parse_args(&args)?;
    debug!("running {}", args[0]);

    let app = BrokeButHungry::builder().build()?;

    match command {
        Command::Login(form) => print_auth(app.auth().login(form).await)?,
        Command::Register(form) => print_auth(app.auth().register(form).await)?,
        Command::ResetPassword(form) => print_auth(app.auth().reset_password(form).await)?,
        Command::Favorites(username) => match app.favorites().favorites(&username).await {
            Lookup::Found(favorites) => {
                for favorite in favorites {
                    println!("{}", favorite.recipe_id().unwrap_or("?"));
                }
            }
            Lookup::NotFound => println!("No favorites yet"),
            Lookup::Failed(reason) => return Err(reason.into()),
        },
        Command::Search(query) => match app.recipes().search(&query).await {
            Lookup::Found(recipes) => {
                for recipe in recipes {
                    println!(
                        "{}\t{}\t{} ingredients",
                        recipe.id, recipe.title, recipe.ingredient_count
                    );
                }
            }
            Lookup::NotFound => println!("No recipes found"),
            Lookup::Failed(reason) => return Err(reason.into()),
        },
        Command::Recipe(id) => print_detail(&app.recipes().detail(&id).await),
        Command::Nearby(origin) => {
            match app.places().find_nearby(&FixedLocation::new(origin)).await {
                NearbyPlaces::Results {
                    origin,
                    places: Lookup::Found(places),
                } => {
                    print!("{}", render_text(&places));
                    println!("\nMarkers:");
                    print!("{}", format_markers(&map_markers(origin, &places)));
                    if let Some(first) = places.first() {
                        println!("\nOpen in maps: {}", maps_search_uri(&first.name)?);
                    }
                }
                NearbyPlaces::Results {
                    places: Lookup::NotFound,
                    ..
                } => println!("No stores nearby"),
                NearbyPlaces::Results {
                    places: Lookup::Failed(reason),
                    ..
                } => return Err(reason.into()),
                other => return Err(format!("{:?}", other).into()),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_login() {
        match parse_args(&args(&["login", "john", "secret"])) {
            Ok(Command::Login(form)) => {
                assert_eq!(form.username, "john");
                assert_eq!(form.password, "secret");
            }
            other => panic!("Expected login, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_joins_words() {
        match parse_args(&args(&["search", "chicken", "soup"])) {
            Ok(Command::Search(query)) => assert_eq!(query, "chicken soup"),
            other => panic!("Expected search, got {:?}", other),
        }
    }

    #[test]
    fn test_format_markers() {
        let markers = vec![
            MapMarker {
                position: Coordinates::new(34.05, -118.25),
                label: "You are here".to_string(),
            },
            MapMarker {
                position: Coordinates::new(34.1, -118.3),
                label: "Vons".to_string(),
            },
        ];

        assert_eq!(
            format_markers(&markers),
            "34.05,-118.25 You are here\n34.1,-118.3 Vons\n"
        );
        assert_eq!(format_markers(&[]), "");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args(&["login", "john"])).is_err());
        assert!(parse_args(&args(&["nearby", "north", "1.0"])).is_err());
        assert!(parse_args(&args(&["bake"])).is_err());
    }
}

use pharmastudy::PharmaStudyError;

fn main() {
    match pharmastudy::run() {
        Ok(Some((score, total))) => {
            println!(
                "You got {score} correct out of {total} ({:.2}%)",
                if total == 0 {
                    0.0
                } else {
                    (score as f64 / total as f64) * 100.0
                }
            );
            if score == total && total > 0 {
                println!("Well done!");
            }
        }
        Ok(None) => {}
        Err(err) => match err {
            PharmaStudyError::Catalog(err) => eprintln!("Catalog: {err}"),
            PharmaStudyError::Session(err) => eprintln!("Session: {err}"),
            PharmaStudyError::Ui(err) => eprintln!("Ui: {err}"),
            PharmaStudyError::Arg(err) => eprintln!("Arg: {err}"),
            PharmaStudyError::Progress(err) => eprintln!("Progress: {err}"),
            PharmaStudyError::Panic(err) => eprintln!("Panicked: {err}"),
        },
    }
}

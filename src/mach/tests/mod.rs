use crate::mach::{Event, Runtime};

mod load_test;

fn run(runtime: &mut Runtime) -> String {
    run_with_input(runtime, &[])
}

fn run_with_input(runtime: &mut Runtime, input: &[&str]) -> String {
    let mut s = String::new();
    let mut feed = input.iter();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(5000);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Error(error) => {
                s.push_str(&format!("{}\n", error));
                break;
            }
            Event::Running => {
                if prev_running {
                    s.push_str("\n5000 Execution cycles exceeded.\n");
                    break;
                }
            }
            Event::Print(ps) => {
                s.push_str(ps);
            }
            Event::Input => {
                let _ = runtime.input(feed.next().copied());
            }
        }
        prev_running = match event {
            Event::Running => true,
            _ => false,
        };
    }
    s
}

use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

pub mod read {
    use divan::Bencher;
    use h2_agg::{AggArchive, AggWriter};
    use std::io::{prelude::*, Cursor};

    const ENTRIES: usize = 1000;

    fn get_input() -> Vec<u8> {
        let mut agg = AggWriter::new(Cursor::new(Vec::new()));
        for i in 0..ENTRIES {
            agg.start_file(format!("FILE{i:04}.BIN")).unwrap();
            agg.write_all(&vec![i as u8; 64 + i]).unwrap();
        }
        agg.finish().unwrap().into_inner()
    }

    #[divan::bench]
    fn open(bencher: Bencher) {
        bencher.with_inputs(get_input).bench_refs(|data| {
            divan::black_box(AggArchive::new(Cursor::new(data)).unwrap());
        });
    }

    #[divan::bench]
    fn read_asset_first(bencher: Bencher) {
        bencher
            .with_inputs(|| AggArchive::new(Cursor::new(get_input())).unwrap())
            .bench_refs(|agg| {
                divan::black_box(agg.read_asset("FILE0000.BIN"));
            });
    }

    #[divan::bench(sample_count = 1)]
    fn read_asset_all(bencher: Bencher) {
        let mut agg = AggArchive::new(Cursor::new(get_input())).unwrap();
        let names = agg.file_names().map(str::to_owned).collect::<Vec<_>>();

        bencher.bench_local(move || {
            for name in &names {
                divan::black_box(agg.read_asset(name));
            }
        });
    }
}

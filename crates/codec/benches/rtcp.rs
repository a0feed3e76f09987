use bytes::BytesMut;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rtcp_demux_codec::{Compound, Header, PacketType, is_rtcp_packet};

fn criterion_benchmark(c: &mut Criterion) {
    #[rustfmt::skip]
    let mut samples = [
        include_bytes!("../tests/samples/SenderReport.bin").as_slice(),
        include_bytes!("../tests/samples/CompoundReceiverReport.bin").as_slice(),
        include_bytes!("../tests/samples/PictureLossIndication.bin").as_slice(),
        include_bytes!("../tests/samples/RtpPcma.bin").as_slice(),
    ]
    .into_iter()
    .cycle();

    let mut rtcp_criterion = c.benchmark_group("rtcp");

    rtcp_criterion.throughput(Throughput::Elements(1));
    rtcp_criterion.bench_function("classify_all_samples", |bencher| {
        bencher.iter(|| is_rtcp_packet(samples.next().unwrap()))
    });

    rtcp_criterion.bench_function("walk_compound", |bencher| {
        let bytes = include_bytes!("../tests/samples/CompoundReceiverReport.bin");
        bencher.iter(|| {
            for item in Compound::new(bytes) {
                item.unwrap();
            }
        })
    });

    rtcp_criterion.bench_function("encode_header", |bencher| {
        let header = Header::new(PacketType::ReceiverReport, 1, 7);
        let mut bytes = BytesMut::with_capacity(1500);
        bencher.iter(|| {
            bytes.clear();
            header.encode(&mut bytes).unwrap();
        })
    });

    rtcp_criterion.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
